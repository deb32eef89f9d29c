//! Alternative packing drivers that do not go through [`BinPacker`](crate::BinPacker).

mod best_fit;

#[doc(inline)]
pub use best_fit::{BestFitIndex, best_fit_stream, par_best_fit_stream};
