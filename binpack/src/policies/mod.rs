//! Pluggable heuristics: how sequences are ordered before packing, and which bin receives a piece.

mod packing;
mod pre_order;

#[doc(inline)]
pub use packing::{AlmostWorstFit, BestFit, FirstFit, LastFit, NextFit, PackingPolicy, WorstFit};
#[doc(inline)]
pub use pre_order::{Ascending, AsIs, Descending, PreOrderPolicy, Random};
