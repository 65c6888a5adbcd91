// SPDX-License-Identifier: LGPL-3.0-only

use tessera_geometry::{Matrix4, Offset, Rect, RoundedRect};

use crate::canvas::Canvas;
use crate::display_list::DisplayList;
use crate::image::Image;
use crate::op::Operation;
use crate::paint::{ClipOp, Color, Paint};
use crate::path::Path;
use crate::text::{ParagraphHandle, TextBlobHandle};

/// Records canvas calls into a [DisplayList].
///
/// Nothing is executed. Every call appends one [Operation] in call order, and
/// [build](DisplayListBuilder::build) snapshots what has been recorded so far
/// without consuming the builder, so later calls extend the same sequence:
///
/// ```
/// # use tessera_core::builder::DisplayListBuilder;
/// # use tessera_core::canvas::Canvas;
/// # use tessera_core::paint::Paint;
/// # use tessera_geometry::Rect;
/// let mut builder = DisplayListBuilder::new();
/// builder.draw_rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0), &Paint::default());
/// let first = builder.build();
/// builder.draw_rect(Rect::from_ltrb(5.0, 5.0, 20.0, 20.0), &Paint::default());
/// let second = builder.build();
/// assert_eq!(first.len(), 1);
/// assert_eq!(second.len(), 2);
/// assert_eq!(second.operations()[0], first.operations()[0]);
/// ```
///
/// A builder must only be used from one thread at a time; the lists it
/// builds can be shared freely.
#[derive(Debug, Clone)]
pub struct DisplayListBuilder {
    ops: Vec<Operation>,
    save_count: usize,
}

impl Default for DisplayListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayListBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty builder with room for `capacity` operations.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ops: Vec::with_capacity(capacity),
            save_count: 1,
        }
    }

    /// Number of recorded operations, not counting those inside nested lists.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.save_count = 1;
    }

    /// Snapshot the recorded operations into an immutable list.
    pub fn build(&self) -> DisplayList {
        log::debug!("Building display list of {} operations", self.ops.len());
        DisplayList::from_operations(self.ops.clone())
    }

    fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }
}

fn check_rect(rect: &Rect) {
    tessera_geometry::validate!(!rect.has_nan(), "NaN rectangle recorded: {rect:?}");
}

fn check_point(point: &Offset) {
    tessera_geometry::validate!(!point.has_nan(), "NaN point recorded: {point:?}");
}

fn check_rrect(rrect: &RoundedRect) {
    tessera_geometry::validate!(
        !rrect.outer_rect().has_nan(),
        "NaN rounded rectangle recorded: {rrect:?}"
    );
}

impl Canvas for DisplayListBuilder {
    fn save(&mut self) {
        self.save_count += 1;
        self.push(Operation::Save);
    }

    fn save_layer(&mut self, bounds: Option<Rect>, paint: &Paint) {
        if let Some(bounds) = &bounds {
            check_rect(bounds);
        }
        self.save_count += 1;
        self.push(Operation::SaveLayer {
            bounds,
            paint: *paint,
        });
    }

    fn restore(&mut self) {
        // Recorded even when unbalanced; the replaying canvas decides.
        self.save_count = self.save_count.saturating_sub(1).max(1);
        self.push(Operation::Restore);
    }

    fn save_count(&self) -> usize {
        self.save_count
    }

    fn clear(&mut self, color: Color) {
        self.push(Operation::Clear { color });
    }

    fn transform(&mut self, matrix: &Matrix4) {
        tessera_geometry::validate!(
            matrix.iter().all(|v| !v.is_nan()),
            "NaN transform recorded: {matrix:?}"
        );
        self.push(Operation::Transform { matrix: *matrix });
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        check_point(&Offset::new(dx, dy));
        self.push(Operation::Translate { dx, dy });
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        check_point(&Offset::new(sx, sy));
        self.push(Operation::Scale { sx, sy });
    }

    fn rotate(&mut self, radians: f32) {
        tessera_geometry::validate!(!radians.is_nan(), "NaN rotation recorded");
        self.push(Operation::Rotate { radians });
    }

    fn clip_rect(&mut self, rect: Rect, op: ClipOp, anti_alias: bool) {
        check_rect(&rect);
        self.push(Operation::ClipRect {
            rect,
            op,
            anti_alias,
        });
    }

    fn clip_rrect(&mut self, rrect: &RoundedRect, anti_alias: bool) {
        check_rrect(rrect);
        self.push(Operation::ClipRRect {
            rrect: *rrect,
            anti_alias,
        });
    }

    fn draw_line(&mut self, p1: Offset, p2: Offset, paint: &Paint) {
        check_point(&p1);
        check_point(&p2);
        self.push(Operation::DrawLine {
            p1,
            p2,
            paint: *paint,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        check_rect(&rect);
        self.push(Operation::DrawRect {
            rect,
            paint: *paint,
        });
    }

    fn draw_rrect(&mut self, rrect: &RoundedRect, paint: &Paint) {
        check_rrect(rrect);
        self.push(Operation::DrawRRect {
            rrect: *rrect,
            paint: *paint,
        });
    }

    fn draw_drrect(&mut self, outer: &RoundedRect, inner: &RoundedRect, paint: &Paint) {
        check_rrect(outer);
        check_rrect(inner);
        self.push(Operation::DrawDRRect {
            outer: *outer,
            inner: *inner,
            paint: *paint,
        });
    }

    fn draw_circle(&mut self, center: Offset, radius: f32, paint: &Paint) {
        check_point(&center);
        tessera_geometry::validate!(!radius.is_nan(), "NaN circle radius recorded");
        self.push(Operation::DrawCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.push(Operation::DrawPath {
            path: path.clone(),
            paint: *paint,
        });
    }

    fn draw_image(&mut self, image: &Image, offset: Offset, paint: &Paint) {
        check_point(&offset);
        self.push(Operation::DrawImage {
            image: image.clone(),
            offset,
            paint: *paint,
        });
    }

    fn draw_image_rect(&mut self, image: &Image, src: Rect, dst: Rect, paint: &Paint) {
        check_rect(&src);
        check_rect(&dst);
        self.push(Operation::DrawImageRect {
            image: image.clone(),
            src,
            dst,
            paint: *paint,
        });
    }

    fn draw_image_nine(&mut self, image: &Image, center: Rect, dst: Rect, paint: &Paint) {
        check_rect(&center);
        check_rect(&dst);
        self.push(Operation::DrawImageNine {
            image: image.clone(),
            center,
            dst,
            paint: *paint,
        });
    }

    fn draw_text_blob(&mut self, blob: &TextBlobHandle, offset: Offset, paint: &Paint) {
        check_point(&offset);
        self.push(Operation::DrawTextBlob {
            blob: blob.clone(),
            offset,
            paint: *paint,
        });
    }

    fn draw_paragraph(&mut self, paragraph: &ParagraphHandle, offset: Offset) {
        check_point(&offset);
        self.push(Operation::DrawParagraph {
            paragraph: paragraph.clone(),
            offset,
        });
    }

    fn draw_display_list(&mut self, list: &DisplayList) {
        self.push(Operation::DrawDisplayList { list: list.clone() });
    }
}
