// SPDX-License-Identifier: LGPL-3.0-only

//! Rounded rectangles with independent elliptical corners.

use crate::offset::Offset;
use crate::radius::Radius;
use crate::rect::Rect;

/// A rectangle with four elliptical corners.
///
/// Unlike [`Rect`], the four edges are stored explicitly. Radii are kept as
/// given, so adjacent corners may overlap; [`RoundedRect::scale_radii`]
/// produces the normalized shape used for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundedRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Top-left corner, horizontal semi-axis.
    pub tl_radius_x: f32,
    /// Top-left corner, vertical semi-axis.
    pub tl_radius_y: f32,
    /// Top-right corner, horizontal semi-axis.
    pub tr_radius_x: f32,
    /// Top-right corner, vertical semi-axis.
    pub tr_radius_y: f32,
    /// Bottom-right corner, horizontal semi-axis.
    pub br_radius_x: f32,
    /// Bottom-right corner, vertical semi-axis.
    pub br_radius_y: f32,
    /// Bottom-left corner, horizontal semi-axis.
    pub bl_radius_x: f32,
    /// Bottom-left corner, vertical semi-axis.
    pub bl_radius_y: f32,
}

impl RoundedRect {
    /// A zero-sized rounded rectangle at the origin.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        tl_radius_x: 0.0,
        tl_radius_y: 0.0,
        tr_radius_x: 0.0,
        tr_radius_y: 0.0,
        br_radius_x: 0.0,
        br_radius_y: 0.0,
        bl_radius_x: 0.0,
        bl_radius_y: 0.0,
    };

    /// Every corner shares the same elliptical radius `(radius_x, radius_y)`.
    pub fn from_ltrb_xy(
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        radius_x: f32,
        radius_y: f32,
    ) -> Self {
        let radius = Radius::elliptical(radius_x, radius_y);
        Self::from_ltrb_and_corners(left, top, right, bottom, radius, radius, radius, radius)
    }

    /// Every corner shares `radius`.
    pub fn from_ltrb_radius(left: f32, top: f32, right: f32, bottom: f32, radius: Radius) -> Self {
        Self::from_ltrb_and_corners(left, top, right, bottom, radius, radius, radius, radius)
    }

    /// Every corner of `rect` shares the same elliptical radius.
    pub fn from_rect_xy(rect: Rect, radius_x: f32, radius_y: f32) -> Self {
        Self::from_ltrb_xy(
            rect.left(),
            rect.top(),
            rect.right(),
            rect.bottom(),
            radius_x,
            radius_y,
        )
    }

    /// Every corner of `rect` shares `radius`.
    pub fn from_rect_and_radius(rect: Rect, radius: Radius) -> Self {
        Self::from_ltrb_radius(rect.left(), rect.top(), rect.right(), rect.bottom(), radius)
    }

    /// Independent radii per corner.
    #[allow(clippy::too_many_arguments)]
    pub fn from_ltrb_and_corners(
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        top_left: Radius,
        top_right: Radius,
        bottom_right: Radius,
        bottom_left: Radius,
    ) -> Self {
        let rrect = Self {
            left,
            top,
            right,
            bottom,
            tl_radius_x: top_left.x,
            tl_radius_y: top_left.y,
            tr_radius_x: top_right.x,
            tr_radius_y: top_right.y,
            br_radius_x: bottom_right.x,
            br_radius_y: bottom_right.y,
            bl_radius_x: bottom_left.x,
            bl_radius_y: bottom_left.y,
        };
        rrect.debug_validate();
        rrect
    }

    /// Independent radii per corner of `rect`.
    pub fn from_rect_and_corners(
        rect: Rect,
        top_left: Radius,
        top_right: Radius,
        bottom_right: Radius,
        bottom_left: Radius,
    ) -> Self {
        Self::from_ltrb_and_corners(
            rect.left(),
            rect.top(),
            rect.right(),
            rect.bottom(),
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        )
    }

    fn debug_validate(&self) {
        crate::validate!(
            !self.left.is_nan()
                && !self.top.is_nan()
                && !self.right.is_nan()
                && !self.bottom.is_nan(),
            "RoundedRect edges must not be NaN: {self:?}"
        );
        crate::validate!(
            self.radii().iter().all(|r| !(*r < 0.0)),
            "RoundedRect radii must not be negative: {self:?}"
        );
    }

    fn radii(&self) -> [f32; 8] {
        [
            self.tl_radius_x,
            self.tl_radius_y,
            self.tr_radius_x,
            self.tr_radius_y,
            self.br_radius_x,
            self.br_radius_y,
            self.bl_radius_x,
            self.bl_radius_y,
        ]
    }

    /// `right - left`.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// `bottom - top`.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// The bounding rectangle.
    pub fn outer_rect(&self) -> Rect {
        Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }

    /// Top-left corner radius.
    pub fn tl_radius(&self) -> Radius {
        Radius {
            x: self.tl_radius_x,
            y: self.tl_radius_y,
        }
    }

    /// Top-right corner radius.
    pub fn tr_radius(&self) -> Radius {
        Radius {
            x: self.tr_radius_x,
            y: self.tr_radius_y,
        }
    }

    /// Bottom-right corner radius.
    pub fn br_radius(&self) -> Radius {
        Radius {
            x: self.br_radius_x,
            y: self.br_radius_y,
        }
    }

    /// Bottom-left corner radius.
    pub fn bl_radius(&self) -> Radius {
        Radius {
            x: self.bl_radius_x,
            y: self.bl_radius_y,
        }
    }

    /// Whether every corner is square.
    pub fn is_rect(&self) -> bool {
        self.tl_radius().is_zero()
            && self.tr_radius().is_zero()
            && self.br_radius().is_zero()
            && self.bl_radius().is_zero()
    }

    /// Whether the bounding box encloses no area.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Whether every edge and radius is finite.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.radii().iter().all(|r| r.is_finite())
    }

    /// The same shape moved by `offset`.
    pub fn shift(&self, offset: Offset) -> Self {
        Self {
            left: self.left + offset.dx,
            top: self.top + offset.dy,
            right: self.right + offset.dx,
            bottom: self.bottom + offset.dy,
            ..*self
        }
    }

    /// Grow the edges outward by `delta` and the radii with them.
    pub fn inflate(&self, delta: f32) -> Self {
        let grow = |r: f32| (r + delta).max(0.0);
        Self {
            left: self.left - delta,
            top: self.top - delta,
            right: self.right + delta,
            bottom: self.bottom + delta,
            tl_radius_x: grow(self.tl_radius_x),
            tl_radius_y: grow(self.tl_radius_y),
            tr_radius_x: grow(self.tr_radius_x),
            tr_radius_y: grow(self.tr_radius_y),
            br_radius_x: grow(self.br_radius_x),
            br_radius_y: grow(self.br_radius_y),
            bl_radius_x: grow(self.bl_radius_x),
            bl_radius_y: grow(self.bl_radius_y),
        }
    }

    /// Shrink the edges inward by `delta` and the radii with them.
    pub fn deflate(&self, delta: f32) -> Self {
        self.inflate(-delta)
    }

    /// Scale every radius by one common factor so that no two radii on the
    /// same side add up to more than that side's length.
    ///
    /// For each side the candidate factor is `limit / (r1 + r2)`, considered
    /// only when the sum exceeds the limit. The smallest candidate (capped at
    /// 1) is applied to all eight components. Rounding can still leave a side
    /// a few ulps over its limit, so the larger radius of such a side is then
    /// nudged down until the sum fits. A scaled rect never scales again.
    pub fn scale_radii(&self) -> Self {
        let abs_width = self.width().abs();
        let abs_height = self.height().abs();

        let mut scale = 1.0f64;
        scale = min_scale(scale, self.bl_radius_y, self.tl_radius_y, abs_height);
        scale = min_scale(scale, self.tl_radius_x, self.tr_radius_x, abs_width);
        scale = min_scale(scale, self.tr_radius_y, self.br_radius_y, abs_height);
        scale = min_scale(scale, self.br_radius_x, self.bl_radius_x, abs_width);

        if scale >= 1.0 {
            return *self;
        }

        let apply = |radius: f32| (radius as f64 * scale) as f32;
        let mut scaled = Self {
            tl_radius_x: apply(self.tl_radius_x),
            tl_radius_y: apply(self.tl_radius_y),
            tr_radius_x: apply(self.tr_radius_x),
            tr_radius_y: apply(self.tr_radius_y),
            br_radius_x: apply(self.br_radius_x),
            br_radius_y: apply(self.br_radius_y),
            bl_radius_x: apply(self.bl_radius_x),
            bl_radius_y: apply(self.bl_radius_y),
            ..*self
        };

        fit_side(&mut scaled.bl_radius_y, &mut scaled.tl_radius_y, abs_height);
        fit_side(&mut scaled.tl_radius_x, &mut scaled.tr_radius_x, abs_width);
        fit_side(&mut scaled.tr_radius_y, &mut scaled.br_radius_y, abs_height);
        fit_side(&mut scaled.br_radius_x, &mut scaled.bl_radius_x, abs_width);

        scaled
    }

    /// Whether `point` is inside the shape.
    ///
    /// Points outside the bounding box (right and bottom edges exclusive) are
    /// rejected first. Inside it, the first corner region (top-left,
    /// top-right, bottom-right, bottom-left) whose normalized radius extent
    /// covers the point decides via the ellipse inequality; points on the
    /// ellipse count as inside.
    pub fn contains(&self, point: Offset) -> bool {
        if point.dx < self.left
            || point.dx >= self.right
            || point.dy < self.top
            || point.dy >= self.bottom
        {
            return false;
        }

        let scaled = self.scale_radii();

        let (x, y, radius_x, radius_y) = if point.dx < self.left + scaled.tl_radius_x
            && point.dy < self.top + scaled.tl_radius_y
        {
            (
                point.dx - self.left - scaled.tl_radius_x,
                point.dy - self.top - scaled.tl_radius_y,
                scaled.tl_radius_x,
                scaled.tl_radius_y,
            )
        } else if point.dx > self.right - scaled.tr_radius_x
            && point.dy < self.top + scaled.tr_radius_y
        {
            (
                point.dx - self.right + scaled.tr_radius_x,
                point.dy - self.top - scaled.tr_radius_y,
                scaled.tr_radius_x,
                scaled.tr_radius_y,
            )
        } else if point.dx > self.right - scaled.br_radius_x
            && point.dy > self.bottom - scaled.br_radius_y
        {
            (
                point.dx - self.right + scaled.br_radius_x,
                point.dy - self.bottom + scaled.br_radius_y,
                scaled.br_radius_x,
                scaled.br_radius_y,
            )
        } else if point.dx < self.left + scaled.bl_radius_x
            && point.dy > self.bottom - scaled.bl_radius_y
        {
            (
                point.dx - self.left - scaled.bl_radius_x,
                point.dy - self.bottom + scaled.bl_radius_y,
                scaled.bl_radius_x,
                scaled.bl_radius_y,
            )
        } else {
            return true;
        };

        if radius_x == 0.0 || radius_y == 0.0 {
            return true;
        }

        let x = x / radius_x;
        let y = y / radius_y;
        x * x + y * y <= 1.0
    }
}

fn min_scale(min: f64, radius1: f32, radius2: f32, limit: f32) -> f64 {
    let sum = radius1 + radius2;
    if sum > limit && sum != 0.0 {
        min.min(limit as f64 / (radius1 as f64 + radius2 as f64))
    } else {
        min
    }
}

// Steps the larger radius toward zero one ulp at a time until the pair fits.
fn fit_side(radius1: &mut f32, radius2: &mut f32, limit: f32) {
    while *radius1 + *radius2 > limit {
        let larger = if *radius1 >= *radius2 { &mut *radius1 } else { &mut *radius2 };
        if !(*larger > 0.0 && larger.is_finite()) {
            return;
        }
        *larger = f32::from_bits(larger.to_bits() - 1);
    }
}

impl From<Rect> for RoundedRect {
    fn from(rect: Rect) -> Self {
        Self::from_rect_and_radius(rect, Radius::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oversized() -> RoundedRect {
        RoundedRect::from_rect_and_radius(
            Rect::from_ltrb(0.0, 0.0, 10.0, 10.0),
            Radius::circular(20.0),
        )
    }

    #[test]
    fn scale_radii_shrinks_to_half_the_shorter_side() {
        let scaled = oversized().scale_radii();
        for radius in [
            scaled.tl_radius(),
            scaled.tr_radius(),
            scaled.br_radius(),
            scaled.bl_radius(),
        ] {
            assert_eq!(radius, Radius::circular(5.0));
        }
        assert_eq!(scaled.outer_rect(), Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn scale_radii_uses_one_global_factor() {
        // The wide side needs no scaling; the tall side halves everything.
        let rrect = RoundedRect::from_ltrb_and_corners(
            0.0,
            0.0,
            100.0,
            8.0,
            Radius::elliptical(4.0, 8.0),
            Radius::elliptical(2.0, 8.0),
            Radius::elliptical(6.0, 8.0),
            Radius::elliptical(10.0, 8.0),
        );
        let scaled = rrect.scale_radii();
        assert_eq!(scaled.tl_radius(), Radius::elliptical(2.0, 4.0));
        assert_eq!(scaled.tr_radius(), Radius::elliptical(1.0, 4.0));
        assert_eq!(scaled.br_radius(), Radius::elliptical(3.0, 4.0));
        assert_eq!(scaled.bl_radius(), Radius::elliptical(5.0, 4.0));
    }

    // Small xorshift generator so the sweep below is reproducible.
    struct Xorshift(u32);

    impl Xorshift {
        fn next_unit(&mut self) -> f32 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 17;
            self.0 ^= self.0 << 5;
            (self.0 >> 8) as f32 / (1u32 << 24) as f32
        }

        fn next_in(&mut self, max: f32) -> f32 {
            self.next_unit() * max
        }
    }

    #[test]
    fn scale_radii_is_idempotent() {
        let mut rng = Xorshift(0x9e37_79b9);
        for _ in 0..50_000 {
            let left = rng.next_in(50.0);
            let top = rng.next_in(50.0);
            let rrect = RoundedRect::from_ltrb_and_corners(
                left,
                top,
                left + rng.next_in(50.0),
                top + rng.next_in(50.0),
                Radius::elliptical(rng.next_in(50.0), rng.next_in(50.0)),
                Radius::elliptical(rng.next_in(50.0), rng.next_in(50.0)),
                Radius::elliptical(rng.next_in(50.0), rng.next_in(50.0)),
                Radius::elliptical(rng.next_in(50.0), rng.next_in(50.0)),
            );
            let once = rrect.scale_radii();
            assert_eq!(once.scale_radii(), once, "rescaled {rrect:?}");

            let (width, height) = (once.width().abs(), once.height().abs());
            assert!(once.tl_radius_x + once.tr_radius_x <= width);
            assert!(once.bl_radius_x + once.br_radius_x <= width);
            assert!(once.tl_radius_y + once.bl_radius_y <= height);
            assert!(once.tr_radius_y + once.br_radius_y <= height);
        }
    }

    #[test]
    fn scale_radii_fixed_samples_are_stable() {
        let samples = [
            oversized(),
            RoundedRect::from_ltrb_xy(0.0, 0.0, 64.0, 16.0, 48.0, 16.0),
            RoundedRect::from_ltrb_xy(-8.0, -8.0, 8.0, 8.0, 2.0, 2.0),
            RoundedRect::from_ltrb_and_corners(
                0.0,
                0.0,
                2.2278864,
                32.0,
                Radius::circular(1.7030154),
                Radius::circular(3.1),
                Radius::ZERO,
                Radius::ZERO,
            ),
        ];
        for rrect in samples {
            let once = rrect.scale_radii();
            assert_eq!(once.scale_radii(), once);
        }
    }

    #[test]
    fn radius_equal_to_side_length_is_not_scaled() {
        let rrect = RoundedRect::from_ltrb_and_corners(
            0.0,
            0.0,
            10.0,
            10.0,
            Radius::circular(10.0),
            Radius::ZERO,
            Radius::ZERO,
            Radius::ZERO,
        );
        assert_eq!(rrect.scale_radii(), rrect);
    }

    #[test]
    fn contains_center_but_not_rounded_corner() {
        let rrect = oversized();
        assert!(rrect.contains(Offset::new(5.0, 5.0)));
        assert!(!rrect.contains(Offset::new(0.0, 0.0)));
        assert!(!rrect.contains(Offset::new(9.5, 9.5)));
    }

    #[test]
    fn points_on_the_corner_ellipse_are_inside() {
        let rrect = RoundedRect::from_ltrb_xy(0.0, 0.0, 20.0, 20.0, 5.0, 5.0);
        // (2, 1) sits at (-3, -4) from the top-left arc's center: exactly on it.
        assert!(rrect.contains(Offset::new(2.0, 1.0)));
        assert!(rrect.contains(Offset::new(1.0, 2.0)));
        assert!(!rrect.contains(Offset::new(1.0, 1.0)));
    }

    #[test]
    fn zero_radii_match_plain_rect_containment() {
        let rect = Rect::from_ltrb(-3.0, 2.0, 7.0, 9.0);
        let rrect = RoundedRect::from(rect);
        let mut y = -4.0f32;
        while y <= 11.0 {
            let mut x = -5.0f32;
            while x <= 9.0 {
                let p = Offset::new(x, y);
                assert_eq!(rrect.contains(p), rect.contains(p), "mismatch at {p:?}");
                x += 0.5;
            }
            y += 0.5;
        }
    }

    #[test]
    fn zero_axis_corner_is_square() {
        let rrect = RoundedRect::from_ltrb_and_corners(
            0.0,
            0.0,
            10.0,
            10.0,
            Radius::elliptical(0.0, 5.0),
            Radius::ZERO,
            Radius::ZERO,
            Radius::ZERO,
        );
        assert!(rrect.contains(Offset::new(0.0, 0.0)));
    }

    #[test]
    fn inflate_grows_edges_and_radii() {
        let rrect = RoundedRect::from_ltrb_xy(0.0, 0.0, 10.0, 10.0, 2.0, 2.0);
        let bigger = rrect.inflate(1.0);
        assert_eq!(bigger.outer_rect(), Rect::from_ltrb(-1.0, -1.0, 11.0, 11.0));
        assert_eq!(bigger.tl_radius(), Radius::circular(3.0));
        assert_eq!(rrect.deflate(3.0).tl_radius(), Radius::ZERO);
    }
}
