/// Set of functions used throughout assure the correctness of the library.
pub mod assertions;

mod amount;

#[doc(inline)]
pub use amount::{Amount, NaturalOrder};
