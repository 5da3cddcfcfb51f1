//! Scalar trait shared by the integer and floating-point domains.
//!
//! The symbolic domain needs exact integer arithmetic with overflow
//! detection; the numeric domain needs division and finiteness checks.
//! Both are expressed through one trait so the propagation loop is written
//! once.

use num_traits::{CheckedAdd, CheckedMul, CheckedNeg, Float, One, Signed, Zero};
use std::fmt::{Debug, Display};

/// Scalar values a [`System`](crate::System) can carry.
pub trait Scalar:
    Clone
    + Copy
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
    /// Addition, `None` on overflow.
    fn try_add(self, rhs: Self) -> Option<Self>;

    /// Multiplication, `None` on overflow.
    fn try_mul(self, rhs: Self) -> Option<Self>;

    /// Negation, `None` on overflow.
    fn try_neg(self) -> Option<Self>;

    /// Whether the value is neither NaN nor infinite.
    fn is_finite(self) -> bool {
        true
    }

    /// Whether the value is `+1` or `-1`.
    fn is_unit_magnitude(self) -> bool {
        self == Self::one() || self == -Self::one()
    }

    /// Conversion used by display rounding.
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn try_add(self, rhs: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &rhs)
                }

                #[inline]
                fn try_mul(self, rhs: Self) -> Option<Self> {
                    CheckedMul::checked_mul(&self, &rhs)
                }

                #[inline]
                fn try_neg(self) -> Option<Self> {
                    CheckedNeg::checked_neg(&self)
                }

                #[inline]
                fn is_unit_magnitude(self) -> bool {
                    Signed::abs(&self) == 1
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn try_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }

                #[inline]
                fn try_mul(self, rhs: Self) -> Option<Self> {
                    Some(self * rhs)
                }

                #[inline]
                fn try_neg(self) -> Option<Self> {
                    Some(-self)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    Float::is_finite(self)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_scalar_int!(i32, i64, i128);
impl_scalar_float!(f32, f64);

/// Macro to generate per-type test variants from a generic test function.
///
/// # Example
///
/// ```ignore
/// fn test_operation_generic<T: Scalar>() {
///     // test implementation
/// }
///
/// linprop::integer_tests!(test_operation, test_operation_generic);
/// // Generates:
/// // #[test] fn test_operation_i32() { test_operation_generic::<i32>(); }
/// // #[test] fn test_operation_i64() { test_operation_generic::<i64>(); }
/// ```
#[macro_export]
macro_rules! integer_tests {
    ($name:ident, $test_fn:ident) => {
        $crate::__paste! {
            #[test]
            fn [<$name _i32>]() {
                $test_fn::<i32>();
            }

            #[test]
            fn [<$name _i64>]() {
                $test_fn::<i64>();
            }
        }
    };
}

/// Same as [`integer_tests!`] for `f32` and `f64`.
#[macro_export]
macro_rules! float_tests {
    ($name:ident, $test_fn:ident) => {
        $crate::__paste! {
            #[test]
            fn [<$name _f32>]() {
                $test_fn::<f32>();
            }

            #[test]
            fn [<$name _f64>]() {
                $test_fn::<f64>();
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_scalar_int_generic<T: Scalar + From<i8>>() {
        let one = T::from(1);
        let two = T::from(2);

        assert_eq!(one.try_add(one), Some(two));
        assert_eq!(two.try_mul(two), Some(T::from(4)));
        assert_eq!(two.try_neg(), Some(T::from(-2)));
        assert!(one.is_unit_magnitude());
        assert!(T::from(-1).is_unit_magnitude());
        assert!(!two.is_unit_magnitude());
        assert!(!T::zero().is_unit_magnitude());
    }

    integer_tests!(test_scalar_int, test_scalar_int_generic);

    #[test]
    fn test_scalar_int_overflow() {
        assert_eq!(i32::MAX.try_add(1), None);
        assert_eq!(i32::MAX.try_mul(2), None);
        assert_eq!(i32::MIN.try_neg(), None);
        assert_eq!(i64::MAX.try_add(-1), Some(i64::MAX - 1));
    }

    fn test_scalar_float_generic<T: Scalar + Float>() {
        let half = T::one() / (T::one() + T::one());
        assert!(Scalar::is_finite(half));
        assert!(!Scalar::is_finite(T::one() / T::zero()));
        assert!(!Scalar::is_finite(T::nan()));
        assert!((-T::one()).is_unit_magnitude());
        assert!(!half.is_unit_magnitude());
        assert!((Scalar::to_f64(half) - 0.5).abs() < 1e-12);
    }

    float_tests!(test_scalar_float, test_scalar_float_generic);
}
