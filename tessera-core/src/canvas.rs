// SPDX-License-Identifier: LGPL-3.0-only

//! The drawing capability shared by recorders and real surfaces.

use tessera_geometry::{Matrix4, Offset, Rect, RoundedRect, Size};

use crate::display_list::DisplayList;
use crate::error::RenderResult;
use crate::image::Image;
use crate::paint::{ClipOp, Color, Paint};
use crate::path::Path;
use crate::text::{ParagraphHandle, TextBlobHandle};

/// Receiver of drawing and state operations.
///
/// Implemented identically by the [DisplayListBuilder](crate::builder::DisplayListBuilder),
/// which records what it receives, by surface canvases, which execute it,
/// and by analysis passes such as [BoundsCanvas](crate::bounds::BoundsCanvas).
///
/// Every [save](Canvas::save) or [save_layer](Canvas::save_layer) should be
/// paired with a [restore](Canvas::restore). Keeping track of that is the
/// implementation's business; callers and display lists never check it.
pub trait Canvas {
    /// Push a copy of the current transform and clip.
    fn save(&mut self);

    /// Like [save](Canvas::save), but also start an offscreen layer that is
    /// composited with `paint` on the matching restore.
    fn save_layer(&mut self, bounds: Option<Rect>, paint: &Paint);

    /// Pop the most recent save.
    fn restore(&mut self);

    /// Number of saves on the stack, starting at 1.
    fn save_count(&self) -> usize;

    /// Restore until [save_count](Canvas::save_count) is `count`.
    fn restore_to_count(&mut self, count: usize) {
        let count = count.max(1);
        while self.save_count() > count {
            self.restore();
        }
    }

    /// Fill the current clip with `color`, replacing what is there.
    fn clear(&mut self, color: Color);

    /// Multiply the current transform by `matrix`.
    fn transform(&mut self, matrix: &Matrix4);

    /// Translate the current transform.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Scale the current transform.
    fn scale(&mut self, sx: f32, sy: f32);

    /// Rotate the current transform, in radians.
    fn rotate(&mut self, radians: f32);

    /// Combine the clip with a rectangle.
    fn clip_rect(&mut self, rect: Rect, op: ClipOp, anti_alias: bool);

    /// Intersect the clip with a rounded rectangle.
    fn clip_rrect(&mut self, rrect: &RoundedRect, anti_alias: bool);

    /// Draw a line segment. Lines are always stroked.
    fn draw_line(&mut self, p1: Offset, p2: Offset, paint: &Paint);

    /// Draw a rectangle.
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    /// Draw a rounded rectangle.
    fn draw_rrect(&mut self, rrect: &RoundedRect, paint: &Paint);

    /// Draw the area between two rounded rectangles.
    fn draw_drrect(&mut self, outer: &RoundedRect, inner: &RoundedRect, paint: &Paint);

    /// Draw a circle.
    fn draw_circle(&mut self, center: Offset, radius: f32, paint: &Paint);

    /// Draw a path.
    fn draw_path(&mut self, path: &Path, paint: &Paint);

    /// Draw an image with its top-left corner at `offset`.
    fn draw_image(&mut self, image: &Image, offset: Offset, paint: &Paint);

    /// Draw the `src` part of an image scaled into `dst`.
    fn draw_image_rect(&mut self, image: &Image, src: Rect, dst: Rect, paint: &Paint);

    /// Draw an image as a nine-slice, stretching `center` to fill `dst`.
    fn draw_image_nine(&mut self, image: &Image, center: Rect, dst: Rect, paint: &Paint);

    /// Draw positioned glyphs.
    fn draw_text_blob(&mut self, blob: &TextBlobHandle, offset: Offset, paint: &Paint);

    /// Draw a laid-out paragraph.
    fn draw_paragraph(&mut self, paragraph: &ParagraphHandle, offset: Offset);

    /// Draw a display list.
    ///
    /// The default replays the list into this canvas, so nested lists need no
    /// special handling. Recorders override it to store the list instead.
    fn draw_display_list(&mut self, list: &DisplayList) {
        list.dispatch(self);
    }
}

/// A canvas backed directly by a drawing surface.
pub trait SurfaceCanvas: Canvas {
    /// Physical size of the surface in pixels.
    fn size(&self) -> Size<u32>;

    /// Submit everything drawn since the last flush.
    fn flush(&mut self) -> RenderResult<()>;
}
