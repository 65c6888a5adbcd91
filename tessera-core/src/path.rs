// SPDX-License-Identifier: LGPL-3.0-only

//! Vector paths built from line and Bézier segments.

use tessera_geometry::{Point, Radius, Rect, RoundedRect};

/// Control-point distance for a cubic approximating a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// A single path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new contour.
    MoveTo(Point),
    /// Straight line to the point.
    LineTo(Point),
    /// Quadratic curve: control point, end point.
    QuadTo(Point, Point),
    /// Cubic curve: two control points, end point.
    CubicTo(Point, Point, Point),
    /// Close the current contour.
    Close,
}

/// Rule deciding which regions of a self-intersecting path are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathFillType {
    /// Inside where the winding number is non-zero.
    #[default]
    NonZero,
    /// Inside where the winding number is odd.
    EvenOdd,
}

/// An ordered list of contours.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
    fill_type: PathFillType,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill rule.
    pub fn with_fill_type(mut self, fill_type: PathFillType) -> Self {
        self.fill_type = fill_type;
        self
    }

    /// The fill rule.
    pub fn fill_type(&self) -> PathFillType {
        self.fill_type
    }

    /// Change the fill rule.
    pub fn set_fill_type(&mut self, fill_type: PathFillType) {
        self.fill_type = fill_type;
    }

    /// Begin a new contour at `(x, y)`.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Add a straight segment.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Add a quadratic segment.
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        self.commands
            .push(PathCommand::QuadTo(Point::new(cx, cy), Point::new(x, y)));
        self
    }

    /// Add a cubic segment.
    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCommand::CubicTo(
            Point::new(c1x, c1y),
            Point::new(c2x, c2y),
            Point::new(x, y),
        ));
        self
    }

    /// Close the current contour.
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Drop all segments, keeping the fill rule.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Add a closed rectangle, clockwise from the top-left corner.
    pub fn add_rect(&mut self, rect: Rect) -> &mut Self {
        self.move_to(rect.left(), rect.top())
            .line_to(rect.right(), rect.top())
            .line_to(rect.right(), rect.bottom())
            .line_to(rect.left(), rect.bottom())
            .close()
    }

    /// Add the ellipse inscribed in `rect`.
    pub fn add_oval(&mut self, rect: Rect) -> &mut Self {
        let c = rect.center();
        let rx = rect.width() * 0.5;
        let ry = rect.height() * 0.5;
        let kx = KAPPA * rx;
        let ky = KAPPA * ry;

        self.move_to(c.dx + rx, c.dy)
            .cubic_to(c.dx + rx, c.dy + ky, c.dx + kx, c.dy + ry, c.dx, c.dy + ry)
            .cubic_to(c.dx - kx, c.dy + ry, c.dx - rx, c.dy + ky, c.dx - rx, c.dy)
            .cubic_to(c.dx - rx, c.dy - ky, c.dx - kx, c.dy - ry, c.dx, c.dy - ry)
            .cubic_to(c.dx + kx, c.dy - ry, c.dx + rx, c.dy - ky, c.dx + rx, c.dy)
            .close()
    }

    /// Add a circle.
    pub fn add_circle(&mut self, center: Point, radius: f32) -> &mut Self {
        self.add_oval(Rect::from_center(center, radius * 2.0, radius * 2.0))
    }

    /// Add a rounded rectangle with elliptical corners, clockwise from the
    /// end of the top-left corner.
    ///
    /// Radii are normalized with [RoundedRect::scale_radii] first, so
    /// oversized corners never overlap.
    pub fn add_rrect(&mut self, rrect: &RoundedRect) -> &mut Self {
        let r = rrect.scale_radii();
        let (l, t, rt, b) = (r.left, r.top, r.right, r.bottom);
        let tl = corner(r.tl_radius());
        let tr = corner(r.tr_radius());
        let br = corner(r.br_radius());
        let bl = corner(r.bl_radius());

        self.move_to(l + tl.x, t);
        self.line_to(rt - tr.x, t);
        if !tr.is_zero() {
            let (kx, ky) = (KAPPA * tr.x, KAPPA * tr.y);
            self.cubic_to(rt - tr.x + kx, t, rt, t + tr.y - ky, rt, t + tr.y);
        }
        self.line_to(rt, b - br.y);
        if !br.is_zero() {
            let (kx, ky) = (KAPPA * br.x, KAPPA * br.y);
            self.cubic_to(rt, b - br.y + ky, rt - br.x + kx, b, rt - br.x, b);
        }
        self.line_to(l + bl.x, b);
        if !bl.is_zero() {
            let (kx, ky) = (KAPPA * bl.x, KAPPA * bl.y);
            self.cubic_to(l + bl.x - kx, b, l, b - bl.y + ky, l, b - bl.y);
        }
        self.line_to(l, t + tl.y);
        if !tl.is_zero() {
            let (kx, ky) = (KAPPA * tl.x, KAPPA * tl.y);
            self.cubic_to(l, t + tl.y - ky, l + tl.x - kx, t, l + tl.x, t);
        }
        self.close()
    }

    /// The segments in order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Bounds of every point and control point, or [Rect::ZERO] for an empty
    /// path.
    ///
    /// Control points bound the curves they define, so this never
    /// underestimates the area the path covers.
    pub fn bounds(&self) -> Rect {
        let mut bounds: Option<Rect> = None;
        let mut include = |p: Point| {
            let point = Rect::from_points(p, p);
            bounds = Some(match bounds {
                Some(b) => b.union(&point),
                None => point,
            });
        };
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
                PathCommand::QuadTo(c, p) => {
                    include(c);
                    include(p);
                },
                PathCommand::CubicTo(c1, c2, p) => {
                    include(c1);
                    include(c2);
                    include(p);
                },
                PathCommand::Close => {},
            }
        }
        bounds.unwrap_or(Rect::ZERO)
    }
}

/// A corner with a zero semi-axis is drawn square.
fn corner(radius: Radius) -> Radius {
    if radius.is_zero() {
        Radius::ZERO
    } else {
        radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_chain() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0).line_to(10.0, 0.0).quad_to(10.0, 10.0, 0.0, 10.0).close();
        assert_eq!(path.commands().len(), 4);
        assert_eq!(path.commands()[3], PathCommand::Close);
        path.reset();
        assert!(path.is_empty());
    }

    #[test]
    fn bounds_include_control_points() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0).cubic_to(-5.0, 20.0, 15.0, 20.0, 10.0, 0.0);
        assert_eq!(path.bounds(), Rect::from_ltrb(-5.0, 0.0, 15.0, 20.0));
        assert_eq!(Path::new().bounds(), Rect::ZERO);
    }

    #[test]
    fn rect_and_oval_share_bounds() {
        let rect = Rect::from_xywh(2.0, 3.0, 8.0, 4.0);
        let mut a = Path::new();
        a.add_rect(rect);
        let mut b = Path::new();
        b.add_oval(rect);
        assert_eq!(a.bounds(), rect);
        assert_eq!(b.bounds(), rect);
    }

    #[test]
    fn rrect_with_square_corners_is_lines_only() {
        let mut path = Path::new();
        path.add_rrect(&RoundedRect::from(Rect::from_ltrb(0.0, 0.0, 10.0, 5.0)));
        assert!(path
            .commands()
            .iter()
            .all(|c| !matches!(c, PathCommand::CubicTo(..))));
        assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn rrect_corners_are_cubic_and_stay_in_bounds() {
        let rrect = RoundedRect::from_rect_and_radius(
            Rect::from_ltrb(0.0, 0.0, 20.0, 10.0),
            Radius::elliptical(6.0, 3.0),
        );
        let mut path = Path::new();
        path.add_rrect(&rrect);
        let cubics = path
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::CubicTo(..)))
            .count();
        assert_eq!(cubics, 4);
        assert_eq!(path.bounds(), rrect.outer_rect());
    }
}
