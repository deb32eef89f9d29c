use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

use log::info;
use rayon::prelude::*;
use thousands::Separable;

use crate::entities::Bin;
use crate::error::{PackError, Result};
use crate::util::Amount;
use crate::util::assertions;

/// Best-fit packing backed by an index of bins keyed on their remaining capacity.
///
/// Bins sharing the exact same remaining capacity queue up under one key in insertion order.
/// Finding the tightest bin for a piece is a ceiling lookup in the ordered map, so each insertion
/// costs O(log n) instead of a scan over all bins.
///
/// Every bin lives under exactly one key: its current [`Bin::max_remaining_capacity`].
/// [`BestFitIndex::insert`] takes `&mut self`, so locating, popping, filling and re-inserting a bin always
/// happens as one step. Sharing an index between threads requires wrapping it in a `Mutex`.
#[derive(Debug, Clone)]
pub struct BestFitIndex<A: Amount = f64> {
    buckets: BTreeMap<A::Key, VecDeque<Bin<A>>>,
    n_bins: usize,
    n_pieces: usize,
}

impl<A: Amount> Default for BestFitIndex<A> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            n_bins: 0,
            n_pieces: 0,
        }
    }
}

impl<A: Amount> BestFitIndex<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `piece` in the bin with the smallest remaining capacity that can still hold it.
    /// If no such bin exists, a new one is requested from `new_bin`.
    ///
    /// Among bins with equal remaining capacity, the one that has been waiting longest is chosen.
    pub fn insert(&mut self, piece: A, new_bin: impl FnOnce() -> Bin<A>) -> Result<()> {
        if piece.is_nan() {
            return Err(PackError::NanPiece(self.n_pieces));
        }

        let ceiling_key = self.buckets.range(piece.key()..).next().map(|(k, _)| *k);

        if let Some(key) = ceiling_key {
            let mut bin = self.pop(key);
            if bin.add(piece) {
                self.push(bin);
                self.n_pieces += 1;
                return Ok(());
            }
            //remaining capacity covers the piece, but the float sum total + piece overshoots the capacity
            self.buckets.entry(key).or_default().push_front(bin);
        }

        let mut bin = new_bin();
        if !bin.add(piece) {
            return Err(PackError::PieceExceedsNewBin {
                piece: piece.to_string(),
                capacity: bin.max_capacity().to_string(),
            });
        }
        self.push(bin);
        self.n_bins += 1;
        self.n_pieces += 1;
        Ok(())
    }

    /// Absorbs all bins of `other`. Bins under equal keys are queued behind the ones already present.
    pub fn merge(&mut self, other: BestFitIndex<A>) {
        for (key, queue) in other.buckets {
            self.buckets.entry(key).or_default().extend(queue);
        }
        self.n_bins += other.n_bins;
        self.n_pieces += other.n_pieces;
    }

    /// Number of bins in the index
    pub fn len(&self) -> usize {
        self.n_bins
    }

    pub fn is_empty(&self) -> bool {
        self.n_bins == 0
    }

    pub fn n_pieces(&self) -> usize {
        self.n_pieces
    }

    /// All bins, from least to most remaining capacity.
    pub fn bins(&self) -> impl Iterator<Item = &Bin<A>> {
        self.buckets.values().flatten()
    }

    pub fn into_bins(self) -> Vec<Bin<A>> {
        debug_assert!(assertions::index_is_consistent(&self));
        self.buckets.into_values().flatten().collect()
    }

    pub(crate) fn buckets(&self) -> impl Iterator<Item = (&A::Key, &VecDeque<Bin<A>>)> {
        self.buckets.iter()
    }

    fn pop(&mut self, key: A::Key) -> Bin<A> {
        let queue = self.buckets.get_mut(&key).expect("key was just looked up");
        let bin = queue.pop_front().expect("buckets are never empty");
        if queue.is_empty() {
            self.buckets.remove(&key);
        }
        bin
    }

    fn push(&mut self, bin: Bin<A>) {
        let key = bin.max_remaining_capacity().key();
        self.buckets.entry(key).or_default().push_back(bin);
    }
}

/// Packs a stream of pieces best-fit, opening bins from `new_bin` when no open bin can hold a piece.
///
/// `piece_as_capacity` converts each piece into the amount it occupies.
pub fn best_fit_stream<P, A, F, G>(
    pieces: impl IntoIterator<Item = P>,
    new_bin: F,
    mut piece_as_capacity: G,
) -> Result<Vec<Bin<A>>>
where
    A: Amount,
    F: Fn() -> Bin<A>,
    G: FnMut(P) -> A,
{
    let start = Instant::now();
    let mut index = BestFitIndex::new();
    for piece in pieces {
        index.insert(piece_as_capacity(piece), &new_bin)?;
    }

    info!(
        "[BF-INDEX] packed {} pieces into {} bins in {:.3}ms",
        index.n_pieces().separate_with_commas(),
        index.len().separate_with_commas(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(index.into_bins())
}

/// Parallel variant of [`best_fit_stream`]: slices of `pieces` are packed into independent indexes
/// which are merged afterwards. Bins never span two slices, so the result usually holds a few more bins
/// than the sequential version.
pub fn par_best_fit_stream<P, A, F, G>(
    pieces: &[P],
    new_bin: F,
    piece_as_capacity: G,
) -> Result<Vec<Bin<A>>>
where
    P: Sync,
    A: Amount,
    F: Fn() -> Bin<A> + Sync,
    G: Fn(&P) -> A + Sync,
{
    let start = Instant::now();
    let index = pieces
        .par_iter()
        .try_fold(BestFitIndex::new, |mut index, piece| {
            index.insert(piece_as_capacity(piece), &new_bin)?;
            Ok::<_, PackError>(index)
        })
        .try_reduce(BestFitIndex::new, |mut a, b| {
            a.merge(b);
            Ok(a)
        })?;

    info!(
        "[BF-INDEX] packed {} pieces into {} bins in {:.3}ms (parallel)",
        index.n_pieces().separate_with_commas(),
        index.len().separate_with_commas(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(index.into_bins())
}
