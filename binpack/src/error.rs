//! Error types for packing runs.

use thiserror::Error;

/// Result type alias for packing operations.
pub type Result<T> = std::result::Result<T, PackError>;

/// Configuration errors that abort a packing run.
///
/// "No existing bin fits" is never an error, packing policies report it as `None`.
/// Invariant violations (negative pieces, overfilled bins) are programmer errors and panic instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PackError {
    /// No capacities were supplied to create new bins from.
    #[error("the capacity catalogue is empty, at least one capacity is required")]
    EmptyCatalogue,

    /// A piece is larger than every capacity a new bin could be created with.
    #[error("piece {piece} exceeds every available capacity (max: {max_capacity})")]
    PieceExceedsCapacity { piece: String, max_capacity: String },

    /// A bin produced by a factory cannot even hold the piece on its own.
    #[error("piece {piece} does not fit in a newly created bin (capacity: {capacity})")]
    PieceExceedsNewBin { piece: String, capacity: String },

    /// Splicing needs a strictly positive maximum capacity.
    #[error("maximum capacity must be positive to splice pieces, got {0}")]
    NonPositiveCapacity(String),

    /// A catalogue capacity is NaN or negative.
    #[error("invalid capacity {0}, capacities must be non-negative numbers")]
    InvalidCapacity(String),

    /// A piece in a sequence is not a number.
    #[error("piece at position {0} is NaN")]
    NanPiece(usize),

    /// A single piece passed to [`BinPacker::pack`](crate::BinPacker::pack) is not a number.
    #[error("piece is NaN")]
    NanSinglePiece,

    /// A policy name was not found in the registry.
    #[error("unknown {kind} policy: {name:?}")]
    UnknownPolicy { kind: &'static str, name: String },
}
