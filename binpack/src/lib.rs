//! Heuristic one-dimensional bin packing.
//!
//! Pieces are packed into capacity-bounded [`Bin`]s by a [`BinPacker`], which combines three
//! [pre-orders](policies::PreOrderPolicy) (pieces, existing bins, capacity catalogue) with a
//! [packing policy](policies::PackingPolicy): first, last, next, best, worst or almost-worst fit.
//! [`SplicingBinPacker`] splits pieces larger than any bin beforehand, and
//! [`collectors::best_fit_stream`] offers an indexed best fit for large streams of pieces.

/// Entities to model the packing process
pub mod entities;

/// Ordering and fitting heuristics
pub mod policies;

/// Indexed packing drivers
pub mod collectors;

/// Helper functions which do not belong to any specific module
pub mod util;

pub mod config;
pub mod registry;

mod error;
mod packer;
mod splice;

#[doc(inline)]
pub use entities::{Bin, PackResult};
#[doc(inline)]
pub use error::{PackError, Result};
#[doc(inline)]
pub use packer::BinPacker;
#[doc(inline)]
pub use splice::{SplicingBinPacker, splice_pieces};
