use std::cmp::Reverse;
use std::fmt::Debug;

use crate::entities::Bin;
use crate::util::Amount;

/// Heuristic that selects which existing bin receives the next piece.
///
/// Policies never mutate bins, they only point at one. Returning `None` means no existing bin qualifies,
/// which is an expected outcome: the packer responds by opening a new bin.
pub trait PackingPolicy<A: Amount>: Debug + Send + Sync {
    /// Returns the index in `bins` of the bin chosen for `piece`.
    fn choose_bin(&self, piece: A, bins: &[Bin<A>]) -> Option<usize>;
}

/// The first bin (in the given order) that can fit the piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

/// The last bin that can fit the piece, scanning all bins in reverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastFit;

/// Only considers the last bin. If the piece does not fit there, no bin is chosen, even if an earlier one has room.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextFit;

/// The fitting bin with the least remaining capacity (tightest fit). Ties go to the earliest bin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

/// The fitting bin with the most remaining capacity. Ties go to the earliest bin.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

/// The fitting bin with the second most remaining capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlmostWorstFit;

fn fitting<A: Amount>(piece: A, bins: &[Bin<A>]) -> impl DoubleEndedIterator<Item = (usize, &Bin<A>)> {
    bins.iter().enumerate().filter(move |(_, bin)| bin.can_fit(piece))
}

impl<A: Amount> PackingPolicy<A> for FirstFit {
    fn choose_bin(&self, piece: A, bins: &[Bin<A>]) -> Option<usize> {
        fitting(piece, bins).next().map(|(i, _)| i)
    }
}

impl<A: Amount> PackingPolicy<A> for LastFit {
    fn choose_bin(&self, piece: A, bins: &[Bin<A>]) -> Option<usize> {
        fitting(piece, bins).next_back().map(|(i, _)| i)
    }
}

impl<A: Amount> PackingPolicy<A> for NextFit {
    fn choose_bin(&self, piece: A, bins: &[Bin<A>]) -> Option<usize> {
        match bins.last() {
            Some(bin) if bin.can_fit(piece) => Some(bins.len() - 1),
            _ => None,
        }
    }
}

impl<A: Amount> PackingPolicy<A> for BestFit {
    fn choose_bin(&self, piece: A, bins: &[Bin<A>]) -> Option<usize> {
        //min_by_key returns the first of several equal minima
        fitting(piece, bins)
            .min_by_key(|(_, bin)| bin.max_remaining_capacity().key())
            .map(|(i, _)| i)
    }
}

impl<A: Amount> PackingPolicy<A> for WorstFit {
    fn choose_bin(&self, piece: A, bins: &[Bin<A>]) -> Option<usize> {
        //max_by_key would return the last of several equal maxima
        fitting(piece, bins)
            .min_by_key(|(_, bin)| Reverse(bin.max_remaining_capacity().key()))
            .map(|(i, _)| i)
    }
}

impl<A: Amount> PackingPolicy<A> for AlmostWorstFit {
    fn choose_bin(&self, piece: A, bins: &[Bin<A>]) -> Option<usize> {
        //single pass, tracking the two emptiest fitting bins
        let mut first: Option<(usize, A::Key)> = None;
        let mut second: Option<(usize, A::Key)> = None;

        for (i, bin) in fitting(piece, bins) {
            let key = bin.max_remaining_capacity().key();
            match (first, second) {
                (None, _) => first = Some((i, key)),
                (Some((_, k1)), _) if key > k1 => {
                    second = first;
                    first = Some((i, key));
                }
                (_, None) => second = Some((i, key)),
                (_, Some((_, k2))) if key > k2 => second = Some((i, key)),
                _ => {}
            }
        }
        second.map(|(i, _)| i)
    }
}
