// SPDX-License-Identifier: LGPL-3.0-only

use std::ops::{Add, Mul, Neg, Sub};

use crate::scalar::Scalar;

/// A 2D displacement `(dx, dy)`.
///
/// Offsets double as points: a point is the offset from the coordinate
/// space origin, see [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset<T = f32> {
    /// Horizontal component.
    pub dx: T,
    /// Vertical component.
    pub dy: T,
}

/// A position, expressed as an [`Offset`] from the origin.
pub type Point<T = f32> = Offset<T>;

impl<T: Scalar> Offset<T> {
    /// The zero offset.
    pub const ZERO: Self = Self {
        dx: T::ZERO,
        dy: T::ZERO,
    };

    /// Create a new offset.
    #[inline]
    pub const fn new(dx: T, dy: T) -> Self {
        Self { dx, dy }
    }

    /// Whether both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// Whether either component is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.dx.is_nan() || self.dy.is_nan()
    }

    /// Returns this offset moved by the given amounts.
    #[inline]
    pub fn translate(&self, dx: T, dy: T) -> Self {
        Self::new(self.dx + dx, self.dy + dy)
    }

    /// Returns this offset scaled per axis.
    #[inline]
    pub fn scale(&self, sx: T, sy: T) -> Self {
        Self::new(self.dx * sx, self.dy * sy)
    }
}

impl Offset<f32> {
    /// Length of the vector.
    pub fn distance(&self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// Square of the length, avoiding the root.
    pub fn distance_squared(&self) -> f32 {
        self.dx * self.dx + self.dy * self.dy
    }

    /// Widen to `f64` components.
    pub fn cast_f64(&self) -> Offset<f64> {
        Offset::new(self.dx as f64, self.dy as f64)
    }
}

impl Offset<f64> {
    /// Narrow to `f32` components.
    pub fn cast_f32(&self) -> Offset<f32> {
        Offset::new(self.dx as f32, self.dy as f32)
    }
}

impl Offset<i32> {
    /// Convert to float components.
    pub fn cast_f32(&self) -> Offset<f32> {
        Offset::new(self.dx as f32, self.dy as f32)
    }
}

impl<T: Scalar> Add for Offset<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl<T: Scalar> Sub for Offset<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl<T: Scalar> Neg for Offset<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

impl<T: Scalar> Mul<T> for Offset<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.dx * rhs, self.dy * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_component_wise() {
        let a = Offset::new(1.0, 2.0);
        let b = Offset::new(3.0, -4.0);
        assert_eq!(a + b, Offset::new(4.0, -2.0));
        assert_eq!(a - b, Offset::new(-2.0, 6.0));
        assert_eq!(-a, Offset::new(-1.0, -2.0));
        assert_eq!(b * 2.0, Offset::new(6.0, -8.0));
        assert_eq!(b.distance(), 5.0);
    }

    #[test]
    fn finiteness_requires_both_components() {
        assert!(Offset::new(1.0f32, 2.0).is_finite());
        assert!(!Offset::new(f32::INFINITY, 2.0).is_finite());
        assert!(!Offset::new(0.0, f32::NAN).is_finite());
        assert!(Offset::new(0.0, f32::NAN).has_nan());
        assert!(Offset::<i32>::new(i32::MIN, 0).is_finite());
    }
}
