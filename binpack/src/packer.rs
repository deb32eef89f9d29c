use std::time::Instant;

use log::{debug, info, trace};
use thousands::Separable;

use crate::entities::{Bin, PackResult};
use crate::error::{PackError, Result};
use crate::policies::{Ascending, BestFit, Descending, PackingPolicy, PreOrderPolicy};
use crate::util::Amount;
use crate::util::assertions;

/// Packs pieces into bins, starting with the caller's existing bins and opening new bins from a
/// catalogue of capacities when no existing bin qualifies.
///
/// Defaults: pieces [`Descending`] (largest first), existing bins [`Descending`] (emptiest first),
/// capacity catalogue [`Ascending`] (smallest sufficient size first) and [`BestFit`].
///
/// ```
/// use binpack::BinPacker;
/// use binpack::policies::{AsIs, FirstFit};
///
/// let packer = BinPacker::new()
///     .with_piece_pre_order(AsIs)
///     .with_packing_policy(FirstFit);
/// let bins = packer.pack_all(vec![3.0, 4.0, 2.0], vec![], vec![6.0]).unwrap();
/// assert_eq!(bins.len(), 2);
/// assert_eq!(bins[0].pieces(), &[3.0, 2.0]);
/// ```
#[derive(Debug)]
pub struct BinPacker<A: Amount = f64> {
    pub(crate) piece_pre_order: Box<dyn PreOrderPolicy<A>>,
    pub(crate) packing_policy: Box<dyn PackingPolicy<A>>,
    pub(crate) existing_bin_pre_order: Box<dyn PreOrderPolicy<Bin<A>>>,
    pub(crate) capacity_pre_order: Box<dyn PreOrderPolicy<A>>,
}

impl<A: Amount> Default for BinPacker<A> {
    fn default() -> Self {
        Self {
            piece_pre_order: Box::new(Descending),
            packing_policy: Box::new(BestFit),
            existing_bin_pre_order: Box::new(Descending),
            capacity_pre_order: Box::new(Ascending),
        }
    }
}

impl<A: Amount> BinPacker<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordering imposed on the pieces before packing.
    pub fn with_piece_pre_order(mut self, policy: impl PreOrderPolicy<A> + 'static) -> Self {
        self.piece_pre_order = Box::new(policy);
        self
    }

    /// The heuristic that fits each piece into one of the bins.
    pub fn with_packing_policy(mut self, policy: impl PackingPolicy<A> + 'static) -> Self {
        self.packing_policy = Box::new(policy);
        self
    }

    /// Ordering imposed on the existing bins before packing, bins compare by remaining capacity.
    pub fn with_existing_bin_pre_order(
        mut self,
        policy: impl PreOrderPolicy<Bin<A>> + 'static,
    ) -> Self {
        self.existing_bin_pre_order = Box::new(policy);
        self
    }

    /// Ordering imposed on the capacity catalogue, in which capacities are tried for new bins.
    pub fn with_capacity_pre_order(mut self, policy: impl PreOrderPolicy<A> + 'static) -> Self {
        self.capacity_pre_order = Box::new(policy);
        self
    }

    pub fn piece_pre_order(&self) -> &dyn PreOrderPolicy<A> {
        self.piece_pre_order.as_ref()
    }

    pub fn packing_policy(&self) -> &dyn PackingPolicy<A> {
        self.packing_policy.as_ref()
    }

    pub fn existing_bin_pre_order(&self) -> &dyn PreOrderPolicy<Bin<A>> {
        self.existing_bin_pre_order.as_ref()
    }

    pub fn capacity_pre_order(&self) -> &dyn PreOrderPolicy<A> {
        self.capacity_pre_order.as_ref()
    }

    /// Packs all `pieces`, filling `existing_bins` first and opening new bins from `capacities` when needed.
    ///
    /// The three pre-orders are applied once, after which the pieces are packed one by one in the resulting
    /// order. The whole input is validated before anything is packed: either every piece ends up in a bin,
    /// or an error is returned and no packing took place.
    ///
    /// Returns the existing bins (in pre-ordered sequence) followed by the newly opened bins.
    pub fn pack_all(
        &self,
        pieces: Vec<A>,
        existing_bins: Vec<Bin<A>>,
        capacities: Vec<A>,
    ) -> Result<PackResult<A>> {
        let start = Instant::now();
        validate_input(&pieces, &capacities)?;

        let n_pieces = pieces.len();
        let n_existing = existing_bins.len();
        let amount_in = A::total_of(
            pieces
                .iter()
                .copied()
                .chain(existing_bins.iter().map(|b| b.total())),
        );

        let pieces = self.piece_pre_order.order(pieces);
        let mut bins = self.existing_bin_pre_order.order(existing_bins);
        let capacities = self.capacity_pre_order.order(capacities);

        for piece in pieces {
            self.pack(piece, &mut bins, &capacities)?;
        }

        debug_assert!(assertions::pieces_conserved(amount_in, &bins));

        info!(
            "[PACK] packed {} pieces into {} bins ({} new) in {:.3}ms",
            n_pieces.separate_with_commas(),
            bins.len().separate_with_commas(),
            (bins.len() - n_existing).separate_with_commas(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(bins)
    }

    /// Packs a single `piece` into `bins`, opening a new bin from `capacities` if the packing policy finds
    /// no existing bin. New bins are appended to `bins`.
    ///
    /// `capacities` is used as-is: no pre-ordering is applied here.
    /// Returns the index of the bin that received the piece.
    pub fn pack(&self, piece: A, bins: &mut Vec<Bin<A>>, capacities: &[A]) -> Result<usize> {
        if piece.is_nan() {
            return Err(PackError::NanSinglePiece);
        }
        let index = match self.packing_policy.choose_bin(piece, bins) {
            Some(index) => index,
            None => {
                let bin = new_bin_for(piece, capacities)?;
                debug!(
                    "[PACK] opening bin #{} with capacities {:?} for piece {piece}",
                    bins.len(),
                    bin.capacities()
                );
                bins.push(bin);
                bins.len() - 1
            }
        };

        let added = bins[index].add(piece);
        assert!(
            added,
            "{:?} chose bin #{index} which cannot fit piece {piece}: {}",
            self.packing_policy, bins[index]
        );
        trace!("[PACK] piece {piece} -> bin #{index}");

        Ok(index)
    }
}

/// Creates an empty bin from the catalogue, failing before any mutation if it could never host `piece`.
fn new_bin_for<A: Amount>(piece: A, capacities: &[A]) -> Result<Bin<A>> {
    let max_capacity = max_catalogue_capacity(capacities)?;
    match piece > max_capacity {
        false => Ok(Bin::new(capacities.to_vec())),
        true => Err(PackError::PieceExceedsCapacity {
            piece: piece.to_string(),
            max_capacity: max_capacity.to_string(),
        }),
    }
}

/// Largest capacity of a non-empty catalogue holding only non-negative numbers.
pub(crate) fn max_catalogue_capacity<A: Amount>(capacities: &[A]) -> Result<A> {
    if let Some(invalid) = capacities.iter().find(|c| c.is_nan() || c.is_negative()) {
        return Err(PackError::InvalidCapacity(invalid.to_string()));
    }
    capacities
        .iter()
        .copied()
        .max_by_key(|c| c.key())
        .ok_or(PackError::EmptyCatalogue)
}

/// Checks the configuration-level preconditions of a packing run.
///
/// Panics on negative pieces: those are invariant violations rather than configuration errors.
fn validate_input<A: Amount>(pieces: &[A], capacities: &[A]) -> Result<()> {
    let max_capacity = max_catalogue_capacity(capacities)?;

    for (i, &piece) in pieces.iter().enumerate() {
        assert!(!piece.is_negative(), "negative pieces are not allowed: {piece} (position {i})");
        if piece.is_nan() {
            return Err(PackError::NanPiece(i));
        }
        if piece > max_capacity {
            return Err(PackError::PieceExceedsCapacity {
                piece: piece.to_string(),
                max_capacity: max_capacity.to_string(),
            });
        }
    }
    Ok(())
}
