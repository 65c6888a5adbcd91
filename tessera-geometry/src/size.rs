// SPDX-License-Identifier: LGPL-3.0-only

use crate::offset::Offset;
use crate::scalar::Scalar;

/// A 2D extent `(width, height)`.
///
/// Negative and zero sizes are representable; they are simply [empty](Size::is_empty).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size<T = f32> {
    /// Horizontal extent.
    pub width: T,
    /// Vertical extent.
    pub height: T,
}

impl<T: Scalar> Size<T> {
    /// The zero size.
    pub const ZERO: Self = Self {
        width: T::ZERO,
        height: T::ZERO,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// A size with equal width and height.
    #[inline]
    pub const fn square(dimension: T) -> Self {
        Self::new(dimension, dimension)
    }

    /// Whether this size encloses no area: `width <= 0 || height <= 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= T::ZERO || self.height <= T::ZERO
    }

    /// Whether both dimensions are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// The smaller of the two dimensions, by magnitude.
    pub fn shortest_side(&self) -> T {
        self.width.abs().min_of(self.height.abs())
    }

    /// The larger of the two dimensions, by magnitude.
    pub fn longest_side(&self) -> T {
        self.width.abs().max_of(self.height.abs())
    }

    /// Whether an offset measured from this size's origin lies inside it.
    ///
    /// The far edges are exclusive.
    pub fn contains(&self, offset: Offset<T>) -> bool {
        offset.dx >= T::ZERO
            && offset.dx < self.width
            && offset.dy >= T::ZERO
            && offset.dy < self.height
    }

    /// Top-left corner of a box of this size placed at `origin`.
    pub fn top_left(&self, origin: Offset<T>) -> Offset<T> {
        origin
    }

    /// Center of the top edge of a box of this size placed at `origin`.
    pub fn top_center(&self, origin: Offset<T>) -> Offset<T> {
        Offset::new(origin.dx + self.width.half(), origin.dy)
    }

    /// Top-right corner of a box of this size placed at `origin`.
    pub fn top_right(&self, origin: Offset<T>) -> Offset<T> {
        Offset::new(origin.dx + self.width, origin.dy)
    }

    /// Center of the left edge of a box of this size placed at `origin`.
    pub fn center_left(&self, origin: Offset<T>) -> Offset<T> {
        Offset::new(origin.dx, origin.dy + self.height.half())
    }

    /// Center of a box of this size placed at `origin`.
    pub fn center(&self, origin: Offset<T>) -> Offset<T> {
        Offset::new(origin.dx + self.width.half(), origin.dy + self.height.half())
    }

    /// Center of the right edge of a box of this size placed at `origin`.
    pub fn center_right(&self, origin: Offset<T>) -> Offset<T> {
        Offset::new(origin.dx + self.width, origin.dy + self.height.half())
    }

    /// Bottom-left corner of a box of this size placed at `origin`.
    pub fn bottom_left(&self, origin: Offset<T>) -> Offset<T> {
        Offset::new(origin.dx, origin.dy + self.height)
    }

    /// Center of the bottom edge of a box of this size placed at `origin`.
    pub fn bottom_center(&self, origin: Offset<T>) -> Offset<T> {
        Offset::new(origin.dx + self.width.half(), origin.dy + self.height)
    }

    /// Bottom-right corner of a box of this size placed at `origin`.
    pub fn bottom_right(&self, origin: Offset<T>) -> Offset<T> {
        Offset::new(origin.dx + self.width, origin.dy + self.height)
    }
}

impl Size<u32> {
    /// Physical pixel sizes converted for geometry math.
    pub fn cast_f32(&self) -> Size<f32> {
        Size::new(self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_any_side_is_not_positive() {
        assert!(Size::new(0.0f32, 10.0).is_empty());
        assert!(Size::new(10.0f32, -1.0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn corner_offsets_are_relative_to_origin() {
        let size = Size::new(10.0, 4.0);
        let origin = Offset::new(1.0, 1.0);
        assert_eq!(size.center(origin), Offset::new(6.0, 3.0));
        assert_eq!(size.bottom_right(origin), Offset::new(11.0, 5.0));
        assert_eq!(size.top_center(origin), Offset::new(6.0, 1.0));
        assert_eq!(size.center_left(Offset::ZERO), Offset::new(0.0, 2.0));
    }

    #[test]
    fn integer_centers_truncate() {
        let size = Size::new(5, 3);
        assert_eq!(size.center(Offset::ZERO), Offset::new(2, 1));
        assert_eq!(size.shortest_side(), 3);
    }
}
