use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};

use ordered_float::OrderedFloat;

/// Natural ordering used by the sorting pre-orders.
/// Amounts compare by value, bins by their maximum remaining capacity.
pub trait NaturalOrder {
    fn natural_cmp(&self, other: &Self) -> Ordering;
}

/// Numeric capability shared by pieces and capacities.
///
/// Pieces and capacities are collapsed into a single type: a bin of `f64` capacities holds `f64` pieces.
/// The trait only asks for what packing needs: addition and subtraction for capacity accounting,
/// a totally ordered [`Amount::Key`] for sorting and indexing, and whole-unit division for splicing.
pub trait Amount:
    Copy
    + NaturalOrder
    + Debug
    + Display
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Totally ordered representation of the amount, used for sorting and as key of ordered maps.
    type Key: Ord + Copy + Debug + Send + Sync;

    const ZERO: Self;

    fn key(self) -> Self::Key;

    fn is_nan(self) -> bool {
        false
    }

    fn is_negative(self) -> bool {
        self < Self::ZERO
    }

    /// Number of whole `unit`s contained in `self`, rounded down. `unit` must be positive.
    fn whole_units(self, unit: Self) -> usize;

    /// `self` added `n` times to zero.
    fn times(self, n: usize) -> Self;

    /// Equality up to accumulated floating point error. Exact for integers.
    fn approx_eq(self, other: Self) -> bool;

    fn total_of<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        iter.into_iter().fold(Self::ZERO, |acc, a| acc + a)
    }
}

macro_rules! impl_float_amount {
    ($t:ty, $rel_eps:expr) => {
        impl NaturalOrder for $t {
            fn natural_cmp(&self, other: &Self) -> Ordering {
                OrderedFloat(*self).cmp(&OrderedFloat(*other))
            }
        }

        impl Amount for $t {
            type Key = OrderedFloat<$t>;

            const ZERO: Self = 0.0;

            fn key(self) -> Self::Key {
                OrderedFloat(self)
            }

            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            fn whole_units(self, unit: Self) -> usize {
                (self / unit).floor() as usize
            }

            fn times(self, n: usize) -> Self {
                self * n as $t
            }

            fn approx_eq(self, other: Self) -> bool {
                let scale = self.abs().max(other.abs()).max(1.0);
                float_cmp::approx_eq!($t, self, other, epsilon = $rel_eps * scale, ulps = 4)
            }
        }
    };
}

macro_rules! impl_int_amount {
    ($($t:ty),*) => {
        $(
            impl NaturalOrder for $t {
                fn natural_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }

            impl Amount for $t {
                type Key = $t;

                const ZERO: Self = 0;

                fn key(self) -> Self::Key {
                    self
                }

                fn whole_units(self, unit: Self) -> usize {
                    (self / unit) as usize
                }

                fn times(self, n: usize) -> Self {
                    self * n as $t
                }

                fn approx_eq(self, other: Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_float_amount!(f64, 1e-9);
impl_float_amount!(f32, 1e-5);
impl_int_amount!(u32, u64, usize, i32, i64);
