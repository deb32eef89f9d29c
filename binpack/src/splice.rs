use log::debug;

use crate::BinPacker;
use crate::entities::{Bin, PackResult};
use crate::error::{PackError, Result};
use crate::packer::max_catalogue_capacity;
use crate::util::Amount;

/// A [`BinPacker`] that first splits every piece larger than the largest catalogue capacity.
///
/// An oversized piece `p` is replaced, in place, by `floor(p / max)` pieces of size `max` followed by the
/// remainder (if any). Splitting happens before the pieces are pre-ordered, so size-based orderings see
/// the spliced pieces rather than the original ones.
#[derive(Debug, Default)]
pub struct SplicingBinPacker<A: Amount = f64> {
    packer: BinPacker<A>,
}

impl<A: Amount> SplicingBinPacker<A> {
    pub fn new(packer: BinPacker<A>) -> Self {
        Self { packer }
    }

    /// The packer that receives the spliced pieces.
    pub fn packer(&self) -> &BinPacker<A> {
        &self.packer
    }

    pub fn pack_all(
        &self,
        pieces: Vec<A>,
        existing_bins: Vec<Bin<A>>,
        capacities: Vec<A>,
    ) -> Result<PackResult<A>> {
        let max_capacity = max_catalogue_capacity(&capacities)?;

        let n_pieces = pieces.len();
        let pieces = splice_pieces(pieces, max_capacity)?;
        if pieces.len() != n_pieces {
            debug!(
                "[SPLICE] {} pieces became {} after splicing at {max_capacity}",
                n_pieces,
                pieces.len()
            );
        }

        self.packer.pack_all(pieces, existing_bins, capacities)
    }
}

/// Splits every piece larger than `max_capacity` into whole `max_capacity` pieces plus a remainder.
///
/// Order is preserved: the sub-pieces take the place of the original, remainder last.
/// A zero remainder is omitted. For floats the sub-pieces sum to the original up to rounding.
pub fn splice_pieces<A: Amount>(
    pieces: impl IntoIterator<Item = A>,
    max_capacity: A,
) -> Result<Vec<A>> {
    if !(max_capacity > A::ZERO) {
        return Err(PackError::NonPositiveCapacity(max_capacity.to_string()));
    }

    let mut spliced = vec![];
    for piece in pieces {
        if !(piece > max_capacity) {
            spliced.push(piece);
            continue;
        }
        let (n_whole, remainder) = split(piece, max_capacity);
        spliced.extend(std::iter::repeat_n(max_capacity, n_whole));
        if remainder > A::ZERO {
            spliced.push(remainder);
        }
    }
    Ok(spliced)
}

/// Number of whole `unit`s in `piece` and what is left, with the remainder kept within `[0, unit]`.
fn split<A: Amount>(piece: A, unit: A) -> (usize, A) {
    let mut n_whole = piece.whole_units(unit);
    let mut remainder = piece - unit.times(n_whole);

    //the float quotient can be off by one in either direction
    if remainder < A::ZERO && n_whole > 0 {
        n_whole -= 1;
        remainder = remainder + unit;
    } else if remainder > unit {
        n_whole += 1;
        remainder = remainder - unit;
    }
    (n_whole, remainder)
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn exact_multiple_has_no_remainder() {
        assert_eq!(splice_pieces(vec![24.0], 8.0).unwrap(), vec![8.0, 8.0, 8.0]);
    }

    #[test]
    fn remainder_comes_last_and_order_is_kept() {
        let spliced = splice_pieces(vec![2.0, 19.0, 5.0], 8.0).unwrap();
        assert_eq!(spliced, vec![2.0, 8.0, 8.0, 3.0, 5.0]);
    }

    #[test]
    fn pieces_at_capacity_are_untouched() {
        assert_eq!(splice_pieces(vec![8_u32, 7, 8], 8).unwrap(), vec![8, 7, 8]);
    }

    #[test]
    fn integer_split() {
        assert_eq!(split(17_u64, 5), (3, 2));
        assert_eq!(split(15_u64, 5), (3, 0));
    }

    #[test]
    fn non_integral_ratio_keeps_the_sum() {
        let spliced = splice_pieces(vec![0.7], 0.1).unwrap();
        assert!(spliced.iter().all(|&p| p > 0.0 && p <= 0.1));
        assert!(f64::total_of(spliced).approx_eq(0.7));
    }

    #[test]
    fn spliced_floats_sum_to_the_original() {
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..1000 {
            let piece = rng.random_range(0.0..50.0);
            let max_capacity = rng.random_range(0.05..5.0);

            let spliced = splice_pieces([piece], max_capacity).unwrap();
            assert!(spliced.iter().all(|&p| p >= 0.0 && p <= max_capacity));
            assert!(
                f64::total_of(spliced.iter().copied()).approx_eq(piece),
                "{piece} spliced at {max_capacity} became {spliced:?}"
            );
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            splice_pieces(vec![1.0], 0.0),
            Err(PackError::NonPositiveCapacity(_))
        ));
    }
}
