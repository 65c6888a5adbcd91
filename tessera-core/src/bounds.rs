// SPDX-License-Identifier: LGPL-3.0-only

//! Conservative bounds of what a sequence of operations draws.

use tessera_geometry::{transform, Matrix4, Offset, Rect, RoundedRect};

use crate::canvas::Canvas;
use crate::image::Image;
use crate::paint::{ClipOp, Color, Paint};
use crate::path::Path;
use crate::text::{ParagraphHandle, TextBlobHandle};

#[derive(Clone, Copy)]
struct State {
    matrix: Matrix4,
    clip: Option<Rect>,
}

/// A canvas that draws nothing and instead accumulates device-space bounds.
///
/// Each shape's local bounds are grown by the paint's [outset](Paint::outset),
/// mapped through the current transform and cut by the current clip. Only
/// intersecting clips shrink the result; difference clips are ignored, which
/// keeps the bounds conservative.
pub struct BoundsCanvas {
    stack: Vec<State>,
    bounds: Option<Rect>,
}

impl Default for BoundsCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsCanvas {
    /// Create a canvas with an identity transform and no clip.
    pub fn new() -> Self {
        Self::with_cull(None)
    }

    /// Create a canvas whose output is limited to `cull`, in device space.
    pub fn with_cull(cull: Option<Rect>) -> Self {
        Self {
            stack: vec![State {
                matrix: Matrix4::identity(),
                clip: cull,
            }],
            bounds: None,
        }
    }

    /// Union of everything drawn so far, or [Rect::ZERO] if nothing was.
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or(Rect::ZERO)
    }

    /// The current transform.
    pub fn matrix(&self) -> &Matrix4 {
        &self.state().matrix
    }

    fn state(&self) -> &State {
        // The base state is never popped.
        &self.stack[self.stack.len() - 1]
    }

    fn state_mut(&mut self) -> &mut State {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn concat(&mut self, matrix: &Matrix4) {
        let state = self.state_mut();
        state.matrix = state.matrix * matrix;
    }

    fn accumulate(&mut self, local: Rect, outset: f32) {
        let state = *self.state();
        let mut device = transform::transform_rect(&state.matrix, local.inflate(outset));
        if let Some(clip) = state.clip {
            device = device.intersect(&clip);
        }
        if device.is_empty() {
            return;
        }
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(&device),
            None => device,
        });
    }

    fn accumulate_paint(&mut self, local: Rect, paint: &Paint) {
        self.accumulate(local, paint.outset());
    }

    fn clip_device(&mut self, local: Rect) {
        let state = self.state_mut();
        let device = transform::transform_rect(&state.matrix, local);
        state.clip = Some(match state.clip {
            Some(clip) => clip.intersect(&device),
            None => device,
        });
    }
}

impl Canvas for BoundsCanvas {
    fn save(&mut self) {
        let state = *self.state();
        self.stack.push(state);
    }

    fn save_layer(&mut self, _bounds: Option<Rect>, _paint: &Paint) {
        self.save();
    }

    fn restore(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn save_count(&self) -> usize {
        self.stack.len()
    }

    fn clear(&mut self, _color: Color) {
        // Clearing covers the clip; without one there is nothing finite to add.
        if let Some(clip) = self.state().clip {
            if !clip.is_empty() {
                self.bounds = Some(match self.bounds {
                    Some(bounds) => bounds.union(&clip),
                    None => clip,
                });
            }
        }
    }

    fn transform(&mut self, matrix: &Matrix4) {
        self.concat(matrix);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(&transform::translation(dx, dy));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(&transform::scaling(sx, sy));
    }

    fn rotate(&mut self, radians: f32) {
        self.concat(&transform::rotation_z(radians));
    }

    fn clip_rect(&mut self, rect: Rect, op: ClipOp, _anti_alias: bool) {
        if op == ClipOp::Intersect {
            self.clip_device(rect);
        }
    }

    fn clip_rrect(&mut self, rrect: &RoundedRect, _anti_alias: bool) {
        self.clip_device(rrect.outer_rect());
    }

    fn draw_line(&mut self, p1: Offset, p2: Offset, paint: &Paint) {
        // Lines are stroked whatever the paint style says.
        let stroke = paint.with_style(crate::paint::PaintStyle::Stroke);
        self.accumulate(Rect::from_points(p1, p2), stroke.outset());
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.accumulate_paint(rect, paint);
    }

    fn draw_rrect(&mut self, rrect: &RoundedRect, paint: &Paint) {
        self.accumulate_paint(rrect.outer_rect(), paint);
    }

    fn draw_drrect(&mut self, outer: &RoundedRect, _inner: &RoundedRect, paint: &Paint) {
        self.accumulate_paint(outer.outer_rect(), paint);
    }

    fn draw_circle(&mut self, center: Offset, radius: f32, paint: &Paint) {
        let diameter = radius * 2.0;
        self.accumulate_paint(Rect::from_center(center, diameter, diameter), paint);
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        if !path.is_empty() {
            self.accumulate_paint(path.bounds(), paint);
        }
    }

    fn draw_image(&mut self, image: &Image, offset: Offset, paint: &Paint) {
        self.accumulate_paint(image.bounds().shift(offset), paint);
    }

    fn draw_image_rect(&mut self, _image: &Image, _src: Rect, dst: Rect, paint: &Paint) {
        self.accumulate_paint(dst, paint);
    }

    fn draw_image_nine(&mut self, _image: &Image, _center: Rect, dst: Rect, paint: &Paint) {
        self.accumulate_paint(dst, paint);
    }

    fn draw_text_blob(&mut self, blob: &TextBlobHandle, offset: Offset, paint: &Paint) {
        self.accumulate_paint(blob.bounds_at(offset), paint);
    }

    fn draw_paragraph(&mut self, paragraph: &ParagraphHandle, offset: Offset) {
        self.accumulate(paragraph.bounds_at(offset), 0.0);
    }
}
