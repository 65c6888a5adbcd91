use tessera_geometry::transform::{self, Matrix4, TransformKind};
use tessera_geometry::{Offset, Rect};

fn naive_bounds(m: &Matrix4, rect: Rect) -> Rect {
    let corners = rect.corners().map(|c| transform::transform_point(m, c));
    let mut left = corners[0].dx;
    let mut top = corners[0].dy;
    let mut right = corners[0].dx;
    let mut bottom = corners[0].dy;
    for c in &corners[1..] {
        left = left.min(c.dx);
        top = top.min(c.dy);
        right = right.max(c.dx);
        bottom = bottom.max(c.dy);
    }
    Rect::from_ltrb(left, top, right, bottom)
}

fn assert_rect_close(actual: Rect, expected: Rect, tolerance: f32) {
    let pairs = [
        (actual.left(), expected.left()),
        (actual.top(), expected.top()),
        (actual.right(), expected.right()),
        (actual.bottom(), expected.bottom()),
    ];
    for (a, e) in pairs {
        assert!(
            (a - e).abs() <= tolerance * e.abs().max(1.0),
            "{actual:?} is not close to {expected:?}"
        );
    }
}

fn sample_affines() -> Vec<Matrix4> {
    vec![
        Matrix4::identity(),
        transform::translation(12.5, -3.0),
        transform::scaling(2.0, 2.0),
        transform::scaling(-1.5, 0.5),
        transform::rotation_z(0.3),
        transform::rotation_z(2.1) * transform::scaling(1.0, -2.0),
        transform::translation(4.0, 9.0) * transform::rotation_z(-1.2),
    ]
}

#[test]
fn affine_fast_path_matches_corner_bounds() {
    let rects = [
        Rect::from_ltrb(0.0, 0.0, 10.0, 10.0),
        Rect::from_ltrb(-5.0, 2.0, 7.5, 40.0),
        Rect::from_xywh(100.0, -100.0, 0.5, 3.0),
    ];
    for m in sample_affines() {
        assert!(transform::is_affine(&m));
        for rect in rects {
            assert_rect_close(
                transform::transform_rect(&m, rect),
                naive_bounds(&m, rect),
                1e-5,
            );
        }
    }
}

#[test]
fn perspective_path_matches_corner_bounds() {
    let mut m = Matrix4::identity();
    m[3] = 0.001;
    m[7] = 0.002;
    let rect = Rect::from_ltrb(10.0, 20.0, 110.0, 70.0);
    assert_eq!(transform::classify(&m), TransformKind::Perspective);
    assert_rect_close(
        transform::transform_rect(&m, rect),
        naive_bounds(&m, rect),
        1e-5,
    );
}

#[test]
fn perspective_through_the_horizon_reports_nan_without_panicking() {
    let mut m = Matrix4::identity();
    m[3] = -0.1;
    // Weight is zero at x == 10.
    let bounds = transform::transform_rect(&m, Rect::from_ltrb(10.0, 0.0, 20.0, 10.0));
    assert!(!bounds.is_finite());
}

#[test]
fn translated_rect_moves_exactly() {
    let moved = transform::transform_rect(
        &transform::translation(5.0, 5.0),
        Rect::from_ltrb(0.0, 0.0, 10.0, 10.0),
    );
    assert_eq!(moved, Rect::from_ltrb(5.0, 5.0, 15.0, 15.0));
}

#[test]
fn inverse_round_trip_recovers_bounds() {
    let rect = Rect::from_ltrb(-3.0, 4.0, 9.0, 12.0);
    for m in sample_affines() {
        let there = transform::transform_rect(&m, rect);
        let back = transform::inverse_transform_rect(&m, there);
        // Rotations inflate the box, so only axis-aligned maps return it exactly.
        if transform::get_as_translation(&m).is_some() || transform::get_as_scale(&m).is_some() {
            assert_rect_close(back, rect, 1e-5);
        } else {
            assert!(back.left() <= rect.left() + 1e-4);
            assert!(back.top() <= rect.top() + 1e-4);
            assert!(back.right() >= rect.right() - 1e-4);
            assert!(back.bottom() >= rect.bottom() - 1e-4);
        }
    }
}

#[test]
fn inverse_of_scale_matches_division() {
    let m = transform::scaling(4.0, 4.0);
    let rect = transform::inverse_transform_rect(&m, Rect::from_ltrb(0.0, 0.0, 8.0, 16.0));
    assert_eq!(rect, Rect::from_ltrb(0.0, 0.0, 2.0, 4.0));
}

#[test]
fn transform_point_is_consistent_with_transform_rect_for_degenerate_rects() {
    let m = transform::rotation_z(0.7) * transform::translation(3.0, -1.0);
    let p = Offset::new(2.0, 5.0);
    let mapped = transform::transform_point(&m, p);
    let bounds = transform::transform_rect(&m, Rect::from_points(p, p));
    assert!((bounds.left() - mapped.dx).abs() < 1e-5);
    assert!((bounds.top() - mapped.dy).abs() < 1e-5);
    assert!(bounds.width().abs() < 1e-5);
    assert!(bounds.height().abs() < 1e-5);
}

#[test]
fn classification_orders_kinds_by_specificity() {
    use TransformKind::*;
    let cases = [
        (Matrix4::identity(), Identity),
        (transform::translation(0.0, 1.0), Translation),
        (transform::scaling(0.5, 0.5), Scale),
        (transform::scaling(0.5, 0.25), Affine),
        (transform::translation(1.0, 1.0) * transform::scaling(2.0, 2.0), Affine),
    ];
    for (m, kind) in cases {
        assert_eq!(transform::classify(&m), kind, "{m:?}");
    }
}

#[test]
fn translation_with_z_component_is_not_a_2d_translation() {
    let mut m = transform::translation(1.0, 1.0);
    m[14] = 3.0;
    assert_eq!(transform::get_as_translation(&m), None);
}
