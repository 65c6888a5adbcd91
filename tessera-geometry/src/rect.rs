// SPDX-License-Identifier: LGPL-3.0-only

use crate::offset::Offset;
use crate::scalar::Scalar;
use crate::size::Size;

/// An axis-aligned rectangle stored as an origin and a size.
///
/// The edges are derived: `right == left + width` and `bottom == top + height`
/// always hold. Rectangles with a negative or zero size are empty, and every
/// operation accepts them without complaint. In particular [`Rect::intersect`]
/// of two disjoint rectangles yields a negative-size rectangle; check
/// [`Rect::is_empty`] afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T = f32> {
    /// Top-left corner
    pub origin: Offset<T>,
    /// Extent from the origin
    pub size: Size<T>,
}

impl<T: Scalar> Rect<T> {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        origin: Offset::ZERO,
        size: Size::ZERO,
    };

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn new(origin: Offset<T>, size: Size<T>) -> Self {
        Self { origin, size }
    }

    /// Create a rectangle from its four edges.
    #[inline]
    pub fn from_ltrb(left: T, top: T, right: T, bottom: T) -> Self {
        Self::new(Offset::new(left, top), Size::new(right - left, bottom - top))
    }

    /// Create a rectangle from its top-left corner and extent.
    #[inline]
    pub fn from_xywh(x: T, y: T, width: T, height: T) -> Self {
        Self::new(Offset::new(x, y), Size::new(width, height))
    }

    /// The smallest rectangle containing both points.
    pub fn from_points(a: Offset<T>, b: Offset<T>) -> Self {
        Self::from_ltrb(
            a.dx.min_of(b.dx),
            a.dy.min_of(b.dy),
            a.dx.max_of(b.dx),
            a.dy.max_of(b.dy),
        )
    }

    /// A rectangle of the given size centered on `center`.
    pub fn from_center(center: Offset<T>, width: T, height: T) -> Self {
        Self::from_xywh(
            center.dx - width.half(),
            center.dy - height.half(),
            width,
            height,
        )
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> T {
        self.origin.dx
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> T {
        self.origin.dy
    }

    /// Right edge, `left + width`.
    #[inline]
    pub fn right(&self) -> T {
        self.origin.dx + self.size.width
    }

    /// Bottom edge, `top + height`.
    #[inline]
    pub fn bottom(&self) -> T {
        self.origin.dy + self.size.height
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> T {
        self.size.width
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> T {
        self.size.height
    }

    /// Move the left edge, keeping the right edge where it is.
    pub fn set_left(&mut self, left: T) {
        let right = self.right();
        self.origin.dx = left;
        self.size.width = right - left;
    }

    /// Move the top edge, keeping the bottom edge where it is.
    pub fn set_top(&mut self, top: T) {
        let bottom = self.bottom();
        self.origin.dy = top;
        self.size.height = bottom - top;
    }

    /// Move the right edge, keeping the left edge where it is.
    pub fn set_right(&mut self, right: T) {
        self.size.width = right - self.origin.dx;
    }

    /// Move the bottom edge, keeping the top edge where it is.
    pub fn set_bottom(&mut self, bottom: T) {
        self.size.height = bottom - self.origin.dy;
    }

    /// Whether the rectangle encloses no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Whether all edges are finite.
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Whether any component is NaN.
    pub fn has_nan(&self) -> bool {
        self.origin.has_nan() || self.size.width.is_nan() || self.size.height.is_nan()
    }

    /// The four corners, clockwise from the top-left.
    pub fn corners(&self) -> [Offset<T>; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Offset<T> {
        self.origin
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Offset<T> {
        Offset::new(self.right(), self.top())
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Offset<T> {
        Offset::new(self.left(), self.bottom())
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Offset<T> {
        Offset::new(self.right(), self.bottom())
    }

    /// Center point.
    pub fn center(&self) -> Offset<T> {
        self.size.center(self.origin)
    }

    /// Whether `point` lies inside. Left and top edges are inclusive, right
    /// and bottom edges exclusive.
    pub fn contains(&self, point: Offset<T>) -> bool {
        point.dx >= self.left()
            && point.dx < self.right()
            && point.dy >= self.top()
            && point.dy < self.bottom()
    }

    /// Whether the two rectangles share any area.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.right() > other.left()
            && other.right() > self.left()
            && self.bottom() > other.top()
            && other.bottom() > self.top()
    }

    /// The overlap of both rectangles.
    ///
    /// Never reports "no overlap" on its own: disjoint inputs give a rectangle
    /// with a negative width or height.
    pub fn intersect(&self, other: &Self) -> Self {
        let left = self.left().max_of(other.left());
        let top = self.top().max_of(other.top());
        let right = self.right().min_of(other.right());
        let bottom = self.bottom().min_of(other.bottom());
        Self::from_ltrb(left, top, right, bottom)
    }

    /// The smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_ltrb(
            self.left().min_of(other.left()),
            self.top().min_of(other.top()),
            self.right().max_of(other.right()),
            self.bottom().max_of(other.bottom()),
        )
    }

    /// The rectangle moved by `offset`.
    pub fn shift(&self, offset: Offset<T>) -> Self {
        Self::new(self.origin + offset, self.size)
    }

    /// The rectangle moved by the given amounts.
    pub fn translate(&self, dx: T, dy: T) -> Self {
        self.shift(Offset::new(dx, dy))
    }

    /// The rectangle grown outward by `delta` on every side.
    pub fn inflate(&self, delta: T) -> Self {
        Self::from_ltrb(
            self.left() - delta,
            self.top() - delta,
            self.right() + delta,
            self.bottom() + delta,
        )
    }

    /// The rectangle shrunk inward by `delta` on every side.
    pub fn deflate(&self, delta: T) -> Self {
        self.inflate(-delta)
    }
}

impl Rect<f32> {
    /// Widen to `f64` components.
    pub fn cast_f64(&self) -> Rect<f64> {
        Rect::new(
            self.origin.cast_f64(),
            Size::new(self.size.width as f64, self.size.height as f64),
        )
    }
}

impl Rect<i32> {
    /// Convert to float components.
    pub fn cast_f32(&self) -> Rect<f32> {
        Rect::new(
            self.origin.cast_f32(),
            Size::new(self.size.width as f32, self.size.height as f32),
        )
    }
}
