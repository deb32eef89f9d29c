mod bin;

#[doc(inline)]
pub use bin::Bin;

/// The ordered sequence of bins produced by a packing run.
pub type PackResult<A = f64> = Vec<Bin<A>>;
