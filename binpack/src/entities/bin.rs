use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::Serialize;

use crate::util::{Amount, NaturalOrder};
use crate::util::assertions;

/// A `Bin` is a container in which pieces are packed.
///
/// A bin holds one or more *candidate* capacities: the bin's actual size is only settled once packing is done
/// (see [`Bin::smallest_capacity_needed`]). Bins supplied by the caller (`existing`) represent the result of a
/// previous or partial packing run and always have a single fixed capacity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bin<A: Amount = f64> {
    /// Accepted pieces, in order of arrival
    pieces: Vec<A>,
    /// Candidate capacities, never empty
    capacities: Vec<A>,
    max_capacity: A,
    total: A,
    existing: bool,
}

impl<A: Amount> Bin<A> {
    /// Creates a new (non-existing) bin that may settle on any of the given capacities.
    ///
    /// Panics if `capacities` is empty, or holds a NaN or negative capacity.
    pub fn new(capacities: Vec<A>) -> Self {
        assert!(!capacities.is_empty(), "a bin needs at least one capacity");
        capacities.iter().for_each(|&c| assert_valid_capacity(c));
        let max_capacity = max_of(&capacities);
        Self {
            pieces: vec![],
            capacities,
            max_capacity,
            total: A::ZERO,
            existing: false,
        }
    }

    /// Creates an existing bin with a single, fixed capacity.
    ///
    /// Panics if `capacity` is NaN or negative.
    pub fn existing(capacity: A) -> Self {
        assert_valid_capacity(capacity);
        Self {
            pieces: vec![],
            capacities: vec![capacity],
            max_capacity: capacity,
            total: A::ZERO,
            existing: true,
        }
    }

    /// Rebuilds an existing bin from the pieces it received in an earlier run.
    ///
    /// Panics if the pieces do not fit the capacity.
    pub fn existing_with_pieces(capacity: A, pieces: impl IntoIterator<Item = A>) -> Self {
        let mut bin = Self::existing(capacity);
        for piece in pieces {
            assert!(
                bin.add(piece),
                "piece {piece} does not fit in existing bin of capacity {capacity} (total: {})",
                bin.total
            );
        }
        bin
    }

    /// Adds `piece` to the bin if it fits. A failed add leaves the bin untouched.
    ///
    /// Panics if `piece` is negative.
    pub fn add(&mut self, piece: A) -> bool {
        assert!(!piece.is_negative(), "negative pieces are not allowed: {piece}");
        if !self.can_fit(piece) {
            return false;
        }
        self.pieces.push(piece);
        self.total = self.total + piece;

        debug_assert!(assertions::bin_is_consistent(self));
        true
    }

    /// Returns true if some candidate capacity can hold the current total plus `piece`.
    pub fn can_fit(&self, piece: A) -> bool {
        let new_total = self.total + piece;
        self.capacities.iter().any(|&c| c >= new_total)
    }

    /// Remaining capacity with respect to the largest candidate capacity.
    /// Bins are ordered by this value: a larger value means an emptier bin.
    pub fn max_remaining_capacity(&self) -> A {
        self.max_capacity - self.total
    }

    /// The smallest candidate capacity that still holds the current total: the size the bin settles on.
    pub fn smallest_capacity_needed(&self) -> A {
        self.capacities
            .iter()
            .copied()
            .filter(|&c| c >= self.total)
            .min_by_key(|&c| c.key())
            .expect("the largest capacity always holds the total")
    }

    /// Unused space once the bin settles on [`Bin::smallest_capacity_needed`].
    pub fn waste(&self) -> A {
        self.smallest_capacity_needed() - self.total
    }

    pub fn pieces(&self) -> &[A] {
        &self.pieces
    }

    pub fn capacities(&self) -> &[A] {
        &self.capacities
    }

    pub fn max_capacity(&self) -> A {
        self.max_capacity
    }

    pub fn total(&self) -> A {
        self.total
    }

    pub fn is_existing(&self) -> bool {
        self.existing
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Bins are ordered by maximum remaining capacity. Ties are left to the caller's scan order.
impl<A: Amount> NaturalOrder for Bin<A> {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.max_remaining_capacity()
            .key()
            .cmp(&other.max_remaining_capacity().key())
    }
}

impl<A: Amount> Display for Bin<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bin{{pieces=[{}], capacities=[{}], total={}, existing={}}}",
            self.pieces.iter().join(", "),
            self.capacities.iter().join(", "),
            self.total,
            self.existing
        )
    }
}

fn assert_valid_capacity<A: Amount>(capacity: A) {
    assert!(
        !capacity.is_nan() && !capacity.is_negative(),
        "capacities must be non-negative numbers: {capacity}"
    );
}

fn max_of<A: Amount>(amounts: &[A]) -> A {
    amounts
        .iter()
        .copied()
        .max_by_key(|a| a.key())
        .expect("amounts should not be empty")
}
