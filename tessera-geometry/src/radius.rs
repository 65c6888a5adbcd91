// SPDX-License-Identifier: LGPL-3.0-only

/// An elliptical corner radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Radius {
    /// Horizontal semi-axis.
    pub x: f32,
    /// Vertical semi-axis.
    pub y: f32,
}

impl Radius {
    /// A radius of zero, giving a square corner.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// A circular radius: `elliptical(radius, radius)`.
    pub fn circular(radius: f32) -> Self {
        Self::elliptical(radius, radius)
    }

    /// An elliptical radius with independent semi-axes.
    pub fn elliptical(x: f32, y: f32) -> Self {
        crate::validate!(
            !(x < 0.0) && !(y < 0.0),
            "Radius components must not be negative, got ({x}, {y})"
        );
        Self { x, y }
    }

    /// Whether either semi-axis is zero, collapsing the corner to a right angle.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 || self.y == 0.0
    }

    /// Clamp both components into `[minimum, maximum]`.
    pub fn clamp(&self, minimum: Radius, maximum: Radius) -> Self {
        Self {
            x: self.x.max(minimum.x).min(maximum.x),
            y: self.y.max(minimum.y).min(maximum.y),
        }
    }

    /// Multiply both components by `factor`.
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_is_elliptical_with_equal_axes() {
        assert_eq!(Radius::circular(4.0), Radius::elliptical(4.0, 4.0));
        assert!(Radius::elliptical(0.0, 3.0).is_zero());
    }

    #[test]
    fn clamp_limits_each_axis() {
        let r = Radius::elliptical(10.0, 1.0);
        let clamped = r.clamp(Radius::circular(2.0), Radius::circular(5.0));
        assert_eq!(clamped, Radius::elliptical(5.0, 2.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn negative_radius_fails_fast_in_debug() {
        let _ = Radius::circular(-1.0);
    }
}
