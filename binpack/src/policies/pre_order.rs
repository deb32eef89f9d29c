use std::fmt::Debug;

use rand::SeedableRng;
use rand::prelude::SliceRandom;
use rand::rngs::SmallRng;

use crate::util::NaturalOrder;

/// Reorders a sequence (pieces, existing bins or the capacity catalogue) before packing.
///
/// Implementations must return a permutation of their input: nothing is dropped or duplicated.
pub trait PreOrderPolicy<T>: Debug + Send + Sync {
    fn order(&self, items: Vec<T>) -> Vec<T>;
}

/// Leaves the sequence untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsIs;

/// Stable sort in natural order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascending;

/// Stable sort in reverse natural order. Equal elements keep their relative input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending;

/// Uniform shuffle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Random {
    /// Seed for the PRNG. If undefined, every call shuffles using entropy
    pub seed: Option<u64>,
}

impl Random {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl<T> PreOrderPolicy<T> for AsIs {
    fn order(&self, items: Vec<T>) -> Vec<T> {
        items
    }
}

impl<T: NaturalOrder> PreOrderPolicy<T> for Ascending {
    fn order(&self, mut items: Vec<T>) -> Vec<T> {
        items.sort_by(|a, b| a.natural_cmp(b));
        items
    }
}

impl<T: NaturalOrder> PreOrderPolicy<T> for Descending {
    fn order(&self, mut items: Vec<T>) -> Vec<T> {
        items.sort_by(|a, b| b.natural_cmp(a));
        items
    }
}

impl<T> PreOrderPolicy<T> for Random {
    fn order(&self, mut items: Vec<T>) -> Vec<T> {
        // SmallRng is a fast, non-cryptographic PRNG
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        items.shuffle(&mut rng);
        items
    }
}
