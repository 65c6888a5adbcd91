// SPDX-License-Identifier: LGPL-3.0-only

//! 4×4 transform utilities.
//!
//! Matrices are [`nalgebra::Matrix4<f32>`], stored column-major: linear index
//! `i` addresses column `i / 4`, row `i % 4`. Indices 12 and 13 hold the x
//! and y translation; indices 3, 7 and 15 form the homogeneous row that a
//! perspective transform populates.
//!
//! Every 2D point or rectangle is treated as lying in the z = 0 plane. All
//! classifiers compare cells exactly: they are fast-path detectors, so a
//! matrix that is merely close to a translation is not a translation.
//!
//! Nothing here reports errors. Perspective divides may produce NaN or
//! infinities and singular matrices invert to non-finite values; callers are
//! expected to tolerate that.

use crate::offset::Offset;
use crate::rect::Rect;

/// A column-major 4×4 matrix.
pub type Matrix4 = nalgebra::Matrix4<f32>;

/// Structural class of a matrix, from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Exactly the identity.
    Identity,
    /// A pure 2D translation.
    Translation,
    /// A uniform 2D scale about the origin.
    Scale,
    /// Any transform with the homogeneous row `[0, 0, 0, 1]`.
    Affine,
    /// A general projective transform.
    Perspective,
}

/// Build a matrix from 16 column-major values.
pub fn matrix_from_slice(values: &[f32]) -> Matrix4 {
    crate::validate!(
        values.len() == 16,
        "A 4x4 matrix needs 16 values, got {}",
        values.len()
    );
    let mut storage = [0.0f32; 16];
    for (slot, value) in storage.iter_mut().zip(values) {
        *slot = *value;
    }
    Matrix4::from_column_slice(&storage)
}

/// A 2D translation matrix.
pub fn translation(dx: f32, dy: f32) -> Matrix4 {
    let mut m = Matrix4::identity();
    m[12] = dx;
    m[13] = dy;
    m
}

/// A 2D scale matrix.
pub fn scaling(sx: f32, sy: f32) -> Matrix4 {
    let mut m = Matrix4::identity();
    m[0] = sx;
    m[5] = sy;
    m
}

/// A rotation about the z axis, positive angles turning x toward y.
pub fn rotation_z(radians: f32) -> Matrix4 {
    let (sin, cos) = radians.sin_cos();
    let mut m = Matrix4::identity();
    m[0] = cos;
    m[1] = sin;
    m[4] = -sin;
    m[5] = cos;
    m
}

/// A matrix sending every point in the z = 0 plane to `offset`.
pub fn force_to_point(offset: Offset) -> Matrix4 {
    let mut m = Matrix4::identity();
    m[0] = 0.0;
    m[5] = 0.0;
    m[12] = offset.dx;
    m[13] = offset.dy;
    m
}

/// Whether `m` is exactly the identity.
pub fn is_identity(m: &Matrix4) -> bool {
    let s = m.as_slice();
    s[0] == 1.0
        && s[1] == 0.0
        && s[2] == 0.0
        && s[3] == 0.0
        && s[4] == 0.0
        && s[5] == 1.0
        && s[6] == 0.0
        && s[7] == 0.0
        && s[8] == 0.0
        && s[9] == 0.0
        && s[10] == 1.0
        && s[11] == 0.0
        && s[12] == 0.0
        && s[13] == 0.0
        && s[14] == 0.0
        && s[15] == 1.0
}

/// Cell-wise equality where `None` stands for the identity.
pub fn matrix_equals(a: Option<&Matrix4>, b: Option<&Matrix4>) -> bool {
    match (a, b) {
        (None, None) => true,
        (None, Some(m)) | (Some(m), None) => is_identity(m),
        (Some(a), Some(b)) => a.as_slice() == b.as_slice(),
    }
}

/// Whether the homogeneous row is `[0, 0, 0, 1]`, the test the rectangle
/// fast path uses.
#[inline]
pub fn is_affine(m: &Matrix4) -> bool {
    let s = m.as_slice();
    s[3] == 0.0 && s[7] == 0.0 && s[15] == 1.0
}

/// The translation `m` performs, if `m` is a pure 2D translation.
pub fn get_as_translation(m: &Matrix4) -> Option<Offset> {
    let s = m.as_slice();
    if s[0] == 1.0
        && s[1] == 0.0
        && s[2] == 0.0
        && s[3] == 0.0
        && s[4] == 0.0
        && s[5] == 1.0
        && s[6] == 0.0
        && s[7] == 0.0
        && s[8] == 0.0
        && s[9] == 0.0
        && s[10] == 1.0
        && s[11] == 0.0
        && s[14] == 0.0
        && s[15] == 1.0
    {
        Some(Offset::new(s[12], s[13]))
    } else {
        None
    }
}

/// The scale factor `m` applies, if `m` is a uniform 2D scale.
pub fn get_as_scale(m: &Matrix4) -> Option<f32> {
    let s = m.as_slice();
    if s[1] == 0.0
        && s[2] == 0.0
        && s[3] == 0.0
        && s[4] == 0.0
        && s[6] == 0.0
        && s[7] == 0.0
        && s[8] == 0.0
        && s[9] == 0.0
        && s[10] == 1.0
        && s[11] == 0.0
        && s[12] == 0.0
        && s[13] == 0.0
        && s[14] == 0.0
        && s[15] == 1.0
        && s[0] == s[5]
    {
        Some(s[0])
    } else {
        None
    }
}

/// Classify `m` into the most specific [`TransformKind`].
pub fn classify(m: &Matrix4) -> TransformKind {
    if is_identity(m) {
        TransformKind::Identity
    } else if get_as_translation(m).is_some() {
        TransformKind::Translation
    } else if get_as_scale(m).is_some() {
        TransformKind::Scale
    } else if is_affine(m) {
        TransformKind::Affine
    } else {
        TransformKind::Perspective
    }
}

/// Apply `m` to `(x, y, 0, 1)` and project back to 2D.
///
/// When the homogeneous weight is not exactly 1 both coordinates are divided
/// by it, which yields NaN or infinities for points sent to infinity.
pub fn transform_point(m: &Matrix4, point: Offset) -> Offset {
    let s = m.as_slice();
    let x = point.dx;
    let y = point.dy;
    let rx = s[0] * x + s[4] * y + s[12];
    let ry = s[1] * x + s[5] * y + s[13];
    let rw = s[3] * x + s[7] * y + s[15];
    if rw == 1.0 {
        Offset::new(rx, ry)
    } else {
        Offset::new(rx / rw, ry / rw)
    }
}

/// The axis-aligned bounding box of `rect` after applying `m`.
///
/// Affine matrices take a fast path: the transformed origin plus the
/// transformed width and height vectors, each added to whichever extreme its
/// sign points to. This equals transforming the four corners and taking
/// min/max. Perspective matrices divide each corner by its own weight.
/// Rectangles with a non-finite size use a corner accumulation that avoids
/// producing `inf - inf`.
pub fn transform_rect(m: &Matrix4, rect: Rect) -> Rect {
    let s = m.as_slice();
    let x = rect.left();
    let y = rect.top();
    let w = rect.width();
    let h = rect.height();

    if !w.is_finite() || !h.is_finite() {
        return safe_transform_rect(m, rect);
    }

    let wx = s[0] * w;
    let hx = s[4] * h;
    let rx = s[0] * x + s[4] * y + s[12];

    let wy = s[1] * w;
    let hy = s[5] * h;
    let ry = s[1] * x + s[5] * y + s[13];

    if is_affine(m) {
        let mut left = rx;
        let mut right = rx;
        if wx < 0.0 {
            left += wx;
        } else {
            right += wx;
        }
        if hx < 0.0 {
            left += hx;
        } else {
            right += hx;
        }

        let mut top = ry;
        let mut bottom = ry;
        if wy < 0.0 {
            top += wy;
        } else {
            bottom += wy;
        }
        if hy < 0.0 {
            top += hy;
        } else {
            bottom += hy;
        }

        Rect::from_ltrb(left, top, right, bottom)
    } else {
        let ww = s[3] * w;
        let hw = s[7] * h;
        let rw = s[3] * x + s[7] * y + s[15];

        let ulx = rx / rw;
        let uly = ry / rw;
        let urx = (rx + wx) / (rw + ww);
        let ury = (ry + wy) / (rw + ww);
        let llx = (rx + hx) / (rw + hw);
        let lly = (ry + hy) / (rw + hw);
        let lrx = (rx + wx + hx) / (rw + ww + hw);
        let lry = (ry + wy + hy) / (rw + ww + hw);

        Rect::from_ltrb(
            min4(ulx, urx, llx, lrx),
            min4(uly, ury, lly, lry),
            max4(ulx, urx, llx, lrx),
            max4(uly, ury, lly, lry),
        )
    }
}

/// The bounding box of `rect` mapped through the inverse of `m`.
///
/// The identity is returned untouched. Otherwise `m` is inverted without an
/// invertibility check, so singular matrices produce non-finite bounds.
pub fn inverse_transform_rect(m: &Matrix4, rect: Rect) -> Rect {
    if is_identity(m) {
        return rect;
    }
    transform_rect(&invert(m), rect)
}

/// Invert `m` through its adjugate.
///
/// A zero determinant is not special-cased: the reciprocal becomes infinite
/// and the result fills with non-finite values.
pub fn invert(m: &Matrix4) -> Matrix4 {
    let a = m.as_slice();
    let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
    let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
    let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);
    let (a30, a31, a32, a33) = (a[12], a[13], a[14], a[15]);

    let b00 = a00 * a11 - a01 * a10;
    let b01 = a00 * a12 - a02 * a10;
    let b02 = a00 * a13 - a03 * a10;
    let b03 = a01 * a12 - a02 * a11;
    let b04 = a01 * a13 - a03 * a11;
    let b05 = a02 * a13 - a03 * a12;
    let b06 = a20 * a31 - a21 * a30;
    let b07 = a20 * a32 - a22 * a30;
    let b08 = a20 * a33 - a23 * a30;
    let b09 = a21 * a32 - a22 * a31;
    let b10 = a21 * a33 - a23 * a31;
    let b11 = a22 * a33 - a23 * a32;

    let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
    let inv_det = 1.0 / det;

    Matrix4::from_column_slice(&[
        (a11 * b11 - a12 * b10 + a13 * b09) * inv_det,
        (-a01 * b11 + a02 * b10 - a03 * b09) * inv_det,
        (a31 * b05 - a32 * b04 + a33 * b03) * inv_det,
        (-a21 * b05 + a22 * b04 - a23 * b03) * inv_det,
        (-a10 * b11 + a12 * b08 - a13 * b07) * inv_det,
        (a00 * b11 - a02 * b08 + a03 * b07) * inv_det,
        (-a30 * b05 + a32 * b02 - a33 * b01) * inv_det,
        (a20 * b05 - a22 * b02 + a23 * b01) * inv_det,
        (a10 * b10 - a11 * b08 + a13 * b06) * inv_det,
        (-a00 * b10 + a01 * b08 - a03 * b06) * inv_det,
        (a30 * b04 - a31 * b02 + a33 * b00) * inv_det,
        (-a20 * b04 + a21 * b02 - a23 * b00) * inv_det,
        (-a10 * b09 + a11 * b07 - a12 * b06) * inv_det,
        (a00 * b09 - a01 * b07 + a02 * b06) * inv_det,
        (-a30 * b03 + a31 * b01 - a32 * b00) * inv_det,
        (a20 * b03 - a21 * b01 + a22 * b00) * inv_det,
    ])
}

/// Transform each corner independently, accumulating min/max as it goes.
fn safe_transform_rect(m: &Matrix4, rect: Rect) -> Rect {
    let affine = is_affine(m);
    let mut bounds = CornerBounds::default();
    bounds.accumulate(m, rect.left(), rect.top(), affine);
    bounds.accumulate(m, rect.right(), rect.top(), affine);
    bounds.accumulate(m, rect.left(), rect.bottom(), affine);
    bounds.accumulate(m, rect.right(), rect.bottom(), affine);
    Rect::from_ltrb(bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y)
}

#[derive(Default)]
struct CornerBounds {
    seeded: bool,
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl CornerBounds {
    fn accumulate(&mut self, m: &Matrix4, x: f32, y: f32, affine: bool) {
        let s = m.as_slice();
        let w = if affine {
            1.0
        } else {
            1.0 / (s[3] * x + s[7] * y + s[15])
        };
        let tx = (s[0] * x + s[4] * y + s[12]) * w;
        let ty = (s[1] * x + s[5] * y + s[13]) * w;
        if !self.seeded {
            self.seeded = true;
            self.min_x = tx;
            self.max_x = tx;
            self.min_y = ty;
            self.max_y = ty;
        } else {
            if tx < self.min_x {
                self.min_x = tx;
            }
            if ty < self.min_y {
                self.min_y = ty;
            }
            if tx > self.max_x {
                self.max_x = tx;
            }
            if ty > self.max_y {
                self.max_y = ty;
            }
        }
    }
}

fn min4(a: f32, b: f32, c: f32, d: f32) -> f32 {
    let e = if a < b { a } else { b };
    let f = if c < d { c } else { d };
    if e < f {
        e
    } else {
        f
    }
}

fn max4(a: f32, b: f32, c: f32, d: f32) -> f32 {
    let e = if a > b { a } else { b };
    let f = if c > d { c } else { d };
    if e > f {
        e
    } else {
        f
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::Size;

    #[test]
    fn translation_moves_rect_exactly() {
        let rect = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let moved = transform_rect(&translation(5.0, 5.0), rect);
        assert_eq!(moved, Rect::from_ltrb(5.0, 5.0, 15.0, 15.0));
    }

    #[test]
    fn classification_is_exact() {
        assert_eq!(classify(&Matrix4::identity()), TransformKind::Identity);
        assert_eq!(classify(&translation(1.0, 2.0)), TransformKind::Translation);
        assert_eq!(classify(&scaling(3.0, 3.0)), TransformKind::Scale);
        assert_eq!(classify(&scaling(3.0, 2.0)), TransformKind::Affine);
        assert_eq!(classify(&rotation_z(0.5)), TransformKind::Affine);

        let mut projective = Matrix4::identity();
        projective[3] = 0.001;
        assert_eq!(classify(&projective), TransformKind::Perspective);

        let mut nearly = translation(4.0, 4.0);
        nearly[1] = f32::EPSILON;
        assert_eq!(get_as_translation(&nearly), None);
        assert_eq!(classify(&nearly), TransformKind::Affine);
    }

    #[test]
    fn translation_and_scale_extraction() {
        assert_eq!(
            get_as_translation(&translation(3.0, -2.0)),
            Some(Offset::new(3.0, -2.0))
        );
        assert_eq!(get_as_translation(&scaling(2.0, 2.0)), None);
        assert_eq!(get_as_scale(&scaling(2.5, 2.5)), Some(2.5));
        assert_eq!(get_as_scale(&scaling(2.5, 1.0)), None);
        assert_eq!(get_as_scale(&translation(1.0, 0.0)), None);
        // The identity is both a zero translation and a unit scale.
        assert_eq!(get_as_translation(&Matrix4::identity()), Some(Offset::ZERO));
        assert_eq!(get_as_scale(&Matrix4::identity()), Some(1.0));
    }

    #[test]
    fn matrix_equals_treats_none_as_identity() {
        let id = Matrix4::identity();
        let t = translation(1.0, 0.0);
        assert!(matrix_equals(None, None));
        assert!(matrix_equals(None, Some(&id)));
        assert!(!matrix_equals(Some(&t), None));
        assert!(matrix_equals(Some(&t), Some(&translation(1.0, 0.0))));
    }

    #[test]
    fn matrix_from_slice_is_column_major() {
        let values: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let m = matrix_from_slice(&values);
        assert_eq!(m[(1, 0)], 1.0);
        assert_eq!(m[(0, 1)], 4.0);
        assert_eq!(m[(0, 3)], 12.0);
    }

    #[test]
    fn transform_point_divides_by_weight() {
        let mut m = Matrix4::identity();
        m[15] = 2.0;
        assert_eq!(transform_point(&m, Offset::new(4.0, 6.0)), Offset::new(2.0, 3.0));
    }

    #[test]
    fn transform_point_to_infinity_is_nan_not_a_panic() {
        let mut m = Matrix4::identity();
        m[15] = 0.0;
        let p = transform_point(&m, Offset::ZERO);
        assert!(p.dx.is_nan() && p.dy.is_nan());
    }

    #[test]
    fn rotation_bounds_cover_the_rotated_corners() {
        let rect = Rect::from_ltrb(0.0, 0.0, 2.0, 1.0);
        let bounds = transform_rect(&rotation_z(std::f32::consts::FRAC_PI_2), rect);
        assert!((bounds.left() + 1.0).abs() < 1e-5);
        assert!(bounds.top().abs() < 1e-5);
        assert!(bounds.right().abs() < 1e-5);
        assert!((bounds.bottom() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn infinite_rect_does_not_manufacture_nan_under_translation() {
        let rect = Rect::from_ltrb(0.0, 0.0, f32::INFINITY, 10.0);
        let moved = transform_rect(&translation(1.0, 1.0), rect);
        assert_eq!(moved.left(), 1.0);
        assert_eq!(moved.top(), 1.0);
        assert_eq!(moved.bottom(), 11.0);
        assert_eq!(moved.right(), f32::INFINITY);
    }

    #[test]
    fn inverse_of_identity_returns_input_unchanged() {
        let rect = Rect::from_xywh(f32::NAN, 0.0, 1.0, 1.0);
        let out = inverse_transform_rect(&Matrix4::identity(), rect);
        assert!(out.left().is_nan());
        assert_eq!(out.top(), 0.0);
        assert_eq!(out.size, Size::new(1.0, 1.0));
    }

    #[test]
    fn singular_inverse_propagates_non_finite_values() {
        let m = scaling(0.0, 1.0);
        let out = inverse_transform_rect(&m, Rect::from_ltrb(0.0, 0.0, 1.0, 1.0));
        assert!(!out.is_finite());
    }

    #[test]
    fn invert_matches_known_inverse() {
        let m = translation(3.0, 4.0) * scaling(2.0, 4.0);
        let inv = invert(&m);
        let expected = scaling(0.5, 0.25) * translation(-3.0, -4.0);
        for (a, b) in inv.as_slice().iter().zip(expected.as_slice()) {
            assert!((a - b).abs() < 1e-6, "{inv:?} != {expected:?}");
        }
    }

    #[test]
    fn force_to_point_collapses_everything() {
        let m = force_to_point(Offset::new(7.0, 8.0));
        assert_eq!(transform_point(&m, Offset::new(-30.0, 99.0)), Offset::new(7.0, 8.0));
    }
}
