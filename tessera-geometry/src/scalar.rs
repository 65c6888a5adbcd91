// SPDX-License-Identifier: LGPL-3.0-only

//! Numeric scalar abstraction shared by the generic geometry types.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A coordinate type the geometry primitives can be instantiated over.
///
/// Implemented for `f32`, `f64`, `i32` and `i64`. Float instantiations are the
/// norm for painting; integer instantiations are used for pixel-aligned values
/// such as the center slice of a nine-patch image.
pub trait Scalar:
    Copy
    + PartialOrd
    + Default
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;

    /// Half of the value. Integer types truncate toward zero.
    fn half(self) -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Whether the value is finite. Always true for integers.
    fn is_finite(self) -> bool;

    /// Whether the value is NaN. Always false for integers.
    fn is_nan(self) -> bool;

    /// The smaller of two values, preferring `self` when unordered.
    #[inline]
    fn min_of(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// The larger of two values, preferring `self` when unordered.
    #[inline]
    fn max_of(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

macro_rules! impl_float_scalar {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                #[inline]
                fn half(self) -> Self {
                    self * 0.5
                }

                #[inline]
                fn abs(self) -> Self {
                    <$ty>::abs(self)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    <$ty>::is_finite(self)
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }
            }
        )*
    };
}

macro_rules! impl_int_scalar {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn half(self) -> Self {
                    self / 2
                }

                #[inline]
                fn abs(self) -> Self {
                    <$ty>::abs(self)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    true
                }

                #[inline]
                fn is_nan(self) -> bool {
                    false
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
impl_int_scalar!(i32, i64);
