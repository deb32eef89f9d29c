//! Explicit name-to-policy registry, used to build packers from configuration.
//!
//! Keys are case-insensitive, `-` and `_` are interchangeable.

use crate::error::{PackError, Result};
use crate::policies::{
    AlmostWorstFit, AsIs, Ascending, BestFit, Descending, FirstFit, LastFit, NextFit,
    PackingPolicy, PreOrderPolicy, Random, WorstFit,
};
use crate::util::{Amount, NaturalOrder};

pub const PRE_ORDER_POLICY_NAMES: [&str; 4] = ["as_is", "ascending", "descending", "random"];

pub const PACKING_POLICY_NAMES: [&str; 6] = [
    "first_fit",
    "last_fit",
    "next_fit",
    "best_fit",
    "worst_fit",
    "almost_worst_fit",
];

/// Looks up a pre-order policy by name. `seed` is only used by `random`.
pub fn pre_order_policy<T: NaturalOrder>(
    name: &str,
    seed: Option<u64>,
) -> Result<Box<dyn PreOrderPolicy<T>>> {
    match normalize(name).as_str() {
        "as_is" => Ok(Box::new(AsIs)),
        "ascending" => Ok(Box::new(Ascending)),
        "descending" => Ok(Box::new(Descending)),
        "random" => Ok(Box::new(Random { seed })),
        _ => Err(PackError::UnknownPolicy {
            kind: "pre-order",
            name: name.to_string(),
        }),
    }
}

/// Looks up a packing policy by name.
pub fn packing_policy<A: Amount>(name: &str) -> Result<Box<dyn PackingPolicy<A>>> {
    match normalize(name).as_str() {
        "first_fit" => Ok(Box::new(FirstFit)),
        "last_fit" => Ok(Box::new(LastFit)),
        "next_fit" => Ok(Box::new(NextFit)),
        "best_fit" => Ok(Box::new(BestFit)),
        "worst_fit" => Ok(Box::new(WorstFit)),
        "almost_worst_fit" => Ok(Box::new(AlmostWorstFit)),
        _ => Err(PackError::UnknownPolicy {
            kind: "packing",
            name: name.to_string(),
        }),
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}
