// SPDX-License-Identifier: LGPL-3.0-only

//! The closed set of recordable operations.

use tessera_geometry::{Matrix4, Offset, Rect, RoundedRect};

use crate::canvas::Canvas;
use crate::display_list::DisplayList;
use crate::image::Image;
use crate::paint::{ClipOp, Color, Paint};
use crate::path::Path;
use crate::text::{ParagraphHandle, TextBlobHandle};

/// One recorded drawing or state instruction.
///
/// Each variant owns everything needed to replay it. Images, text and nested
/// display lists are shared handles, so cloning an operation never copies
/// pixel data or sub-lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// [Canvas::save]
    Save,
    /// [Canvas::save_layer]
    SaveLayer {
        /// Optional layer bounds
        bounds: Option<Rect>,
        /// Compositing paint
        paint: Paint,
    },
    /// [Canvas::restore]
    Restore,
    /// [Canvas::clear]
    Clear {
        /// Replacement color
        color: Color,
    },
    /// [Canvas::transform]
    Transform {
        /// Matrix to concatenate
        matrix: Matrix4,
    },
    /// [Canvas::translate]
    Translate {
        /// Horizontal distance
        dx: f32,
        /// Vertical distance
        dy: f32,
    },
    /// [Canvas::scale]
    Scale {
        /// Horizontal factor
        sx: f32,
        /// Vertical factor
        sy: f32,
    },
    /// [Canvas::rotate]
    Rotate {
        /// Angle in radians
        radians: f32,
    },
    /// [Canvas::clip_rect]
    ClipRect {
        /// Clip rectangle
        rect: Rect,
        /// How it combines with the current clip
        op: ClipOp,
        /// Antialiased edges
        anti_alias: bool,
    },
    /// [Canvas::clip_rrect]
    ClipRRect {
        /// Clip shape
        rrect: RoundedRect,
        /// Antialiased edges
        anti_alias: bool,
    },
    /// [Canvas::draw_line]
    DrawLine {
        /// Start point
        p1: Offset,
        /// End point
        p2: Offset,
        /// Stroke paint
        paint: Paint,
    },
    /// [Canvas::draw_rect]
    DrawRect {
        /// Rectangle
        rect: Rect,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_rrect]
    DrawRRect {
        /// Rounded rectangle
        rrect: RoundedRect,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_drrect]
    DrawDRRect {
        /// Outer boundary
        outer: RoundedRect,
        /// Inner boundary
        inner: RoundedRect,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_circle]
    DrawCircle {
        /// Center point
        center: Offset,
        /// Radius
        radius: f32,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_path]
    DrawPath {
        /// Path
        path: Path,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_image]
    DrawImage {
        /// Image
        image: Image,
        /// Top-left corner
        offset: Offset,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_image_rect]
    DrawImageRect {
        /// Image
        image: Image,
        /// Source region in image pixels
        src: Rect,
        /// Destination rectangle
        dst: Rect,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_image_nine]
    DrawImageNine {
        /// Image
        image: Image,
        /// Stretchable center in image pixels
        center: Rect,
        /// Destination rectangle
        dst: Rect,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_text_blob]
    DrawTextBlob {
        /// Glyph run
        blob: TextBlobHandle,
        /// Origin
        offset: Offset,
        /// Paint
        paint: Paint,
    },
    /// [Canvas::draw_paragraph]
    DrawParagraph {
        /// Laid-out paragraph
        paragraph: ParagraphHandle,
        /// Top-left corner
        offset: Offset,
    },
    /// [Canvas::draw_display_list]
    DrawDisplayList {
        /// Nested list
        list: DisplayList,
    },
}

/// The variant of an [Operation] without its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum OpKind {
    Save,
    SaveLayer,
    Restore,
    Clear,
    Transform,
    Translate,
    Scale,
    Rotate,
    ClipRect,
    ClipRRect,
    DrawLine,
    DrawRect,
    DrawRRect,
    DrawDRRect,
    DrawCircle,
    DrawPath,
    DrawImage,
    DrawImageRect,
    DrawImageNine,
    DrawTextBlob,
    DrawParagraph,
    DrawDisplayList,
}

impl OpKind {
    /// Whether operations of this kind change the save stack, transform or clip
    /// rather than produce pixels.
    pub fn is_state(self) -> bool {
        matches!(
            self,
            OpKind::Save
                | OpKind::SaveLayer
                | OpKind::Restore
                | OpKind::Transform
                | OpKind::Translate
                | OpKind::Scale
                | OpKind::Rotate
                | OpKind::ClipRect
                | OpKind::ClipRRect
        )
    }
}

impl Operation {
    /// The kind of this operation.
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Save => OpKind::Save,
            Operation::SaveLayer { .. } => OpKind::SaveLayer,
            Operation::Restore => OpKind::Restore,
            Operation::Clear { .. } => OpKind::Clear,
            Operation::Transform { .. } => OpKind::Transform,
            Operation::Translate { .. } => OpKind::Translate,
            Operation::Scale { .. } => OpKind::Scale,
            Operation::Rotate { .. } => OpKind::Rotate,
            Operation::ClipRect { .. } => OpKind::ClipRect,
            Operation::ClipRRect { .. } => OpKind::ClipRRect,
            Operation::DrawLine { .. } => OpKind::DrawLine,
            Operation::DrawRect { .. } => OpKind::DrawRect,
            Operation::DrawRRect { .. } => OpKind::DrawRRect,
            Operation::DrawDRRect { .. } => OpKind::DrawDRRect,
            Operation::DrawCircle { .. } => OpKind::DrawCircle,
            Operation::DrawPath { .. } => OpKind::DrawPath,
            Operation::DrawImage { .. } => OpKind::DrawImage,
            Operation::DrawImageRect { .. } => OpKind::DrawImageRect,
            Operation::DrawImageNine { .. } => OpKind::DrawImageNine,
            Operation::DrawTextBlob { .. } => OpKind::DrawTextBlob,
            Operation::DrawParagraph { .. } => OpKind::DrawParagraph,
            Operation::DrawDisplayList { .. } => OpKind::DrawDisplayList,
        }
    }

    /// Invoke the matching canvas method with the stored operands.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match self {
            Operation::Save => canvas.save(),
            Operation::SaveLayer { bounds, paint } => canvas.save_layer(*bounds, paint),
            Operation::Restore => canvas.restore(),
            Operation::Clear { color } => canvas.clear(*color),
            Operation::Transform { matrix } => canvas.transform(matrix),
            Operation::Translate { dx, dy } => canvas.translate(*dx, *dy),
            Operation::Scale { sx, sy } => canvas.scale(*sx, *sy),
            Operation::Rotate { radians } => canvas.rotate(*radians),
            Operation::ClipRect {
                rect,
                op,
                anti_alias,
            } => canvas.clip_rect(*rect, *op, *anti_alias),
            Operation::ClipRRect { rrect, anti_alias } => canvas.clip_rrect(rrect, *anti_alias),
            Operation::DrawLine { p1, p2, paint } => canvas.draw_line(*p1, *p2, paint),
            Operation::DrawRect { rect, paint } => canvas.draw_rect(*rect, paint),
            Operation::DrawRRect { rrect, paint } => canvas.draw_rrect(rrect, paint),
            Operation::DrawDRRect {
                outer,
                inner,
                paint,
            } => canvas.draw_drrect(outer, inner, paint),
            Operation::DrawCircle {
                center,
                radius,
                paint,
            } => canvas.draw_circle(*center, *radius, paint),
            Operation::DrawPath { path, paint } => canvas.draw_path(path, paint),
            Operation::DrawImage {
                image,
                offset,
                paint,
            } => canvas.draw_image(image, *offset, paint),
            Operation::DrawImageRect {
                image,
                src,
                dst,
                paint,
            } => canvas.draw_image_rect(image, *src, *dst, paint),
            Operation::DrawImageNine {
                image,
                center,
                dst,
                paint,
            } => canvas.draw_image_nine(image, *center, *dst, paint),
            Operation::DrawTextBlob {
                blob,
                offset,
                paint,
            } => canvas.draw_text_blob(blob, *offset, paint),
            Operation::DrawParagraph { paragraph, offset } => {
                canvas.draw_paragraph(paragraph, *offset)
            },
            Operation::DrawDisplayList { list } => {
                log::trace!("Replaying nested display list of {} operations", list.len());
                canvas.draw_display_list(list)
            },
        }
    }
}
