#![warn(missing_docs)]

//! Record drawing once, replay it anywhere.
//!
//! Tessera records canvas calls into immutable display lists and replays
//! them into any [Canvas](core::canvas::Canvas): another recorder, an
//! analysis pass or a vello scene.
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! let mut recorder = DisplayListBuilder::new();
//! recorder.save();
//! recorder.translate(10.0, 10.0);
//! recorder.draw_rect(Rect::from_ltrb(0.0, 0.0, 20.0, 20.0), &Paint::fill(Color::BLACK));
//! recorder.restore();
//! let list = recorder.build();
//!
//! assert_eq!(list.bounds(), Rect::from_ltrb(10.0, 10.0, 30.0, 30.0));
//! ```

pub use nalgebra as math;
pub use vello::peniko as color;

pub use tessera_core as core;
pub use tessera_geometry as geometry;

/// A "prelude" for users of tessera.
///
/// Importing this module brings into scope the types needed to record and
/// replay display lists.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Geometry
    pub use crate::geometry::transform::{self, Matrix4, TransformKind};
    pub use crate::geometry::{Offset, Point, Radius, Rect, RoundedRect, Size};

    // Drawing
    pub use crate::core::canvas::{Canvas, SurfaceCanvas};
    pub use crate::core::image::{Image, NativeImage, RgbaImage};
    pub use crate::core::paint::{
        BlendMode, BlurStyle, ClipOp, Color, FilterQuality, MaskFilter, Paint, PaintStyle,
        StrokeCap, StrokeJoin,
    };
    pub use crate::core::path::{Path, PathFillType};
    pub use crate::core::text::{
        Paragraph, ParagraphBuilder, ParagraphHandle, TextBlob, TextBlobHandle,
    };

    // Recording
    pub use crate::core::builder::DisplayListBuilder;
    pub use crate::core::display_list::DisplayList;
    pub use crate::core::op::{OpKind, Operation};

    // Backends
    pub use crate::core::config::RenderConfig;
    pub use crate::core::error::{RenderError, RenderResult};
    pub use crate::core::vgi::{Backend, Renderer, VelloCanvas, VelloRenderer};
}
