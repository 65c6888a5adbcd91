// SPDX-License-Identifier: LGPL-3.0-only

//! Interfaces to the text engine.
//!
//! Shaping and layout happen elsewhere. Tessera stores laid-out text as opaque
//! handles and asks it to paint itself when a display list is replayed.

use std::fmt;
use std::sync::Arc;

use tessera_geometry::{Offset, Rect};

use crate::canvas::Canvas;
use crate::paint::Paint;

/// A laid-out block of text.
pub trait Paragraph: Send + Sync + fmt::Debug {
    /// Laid-out width.
    fn width(&self) -> f32;

    /// Laid-out height.
    fn height(&self) -> f32;

    /// Draw the paragraph with its top-left corner at `offset`.
    fn paint(&self, canvas: &mut dyn Canvas, offset: Offset);
}

/// A run of positioned glyphs.
pub trait TextBlob: Send + Sync + fmt::Debug {
    /// Conservative bounds relative to the blob origin.
    fn bounds(&self) -> Rect;

    /// Draw the glyphs with their origin at `offset`.
    fn paint(&self, canvas: &mut dyn Canvas, offset: Offset, paint: &Paint);
}

/// Accumulates styled text and lays it out into a [Paragraph].
///
/// Handed out by a [Renderer](crate::vgi::renderer::Renderer) that has a text
/// engine attached.
pub trait ParagraphBuilder {
    /// Push a text style; it applies until the matching [pop_style](ParagraphBuilder::pop_style).
    fn push_style(&mut self, paint: &Paint, font_size: f32);

    /// Pop the most recent style.
    fn pop_style(&mut self);

    /// Append text in the current style.
    fn add_text(&mut self, text: &str);

    /// Lay out everything added so far, wrapping at `max_width`.
    fn build(self: Box<Self>, max_width: f32) -> ParagraphHandle;
}

macro_rules! text_handle {
    ($(#[$doc:meta])* $name:ident, $inner:ident) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name(Arc<dyn $inner>);

        impl $name {
            /// Wrap a text engine value.
            pub fn new(inner: impl $inner + 'static) -> Self {
                Self(Arc::new(inner))
            }

            /// Wrap an already shared text engine value.
            pub fn from_arc(inner: Arc<dyn $inner>) -> Self {
                Self(inner)
            }

            /// The wrapped value.
            pub fn get(&self) -> &dyn $inner {
                self.0.as_ref()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }
    };
}

text_handle!(
    /// Shared handle to a [Paragraph], compared by identity.
    ParagraphHandle,
    Paragraph
);

text_handle!(
    /// Shared handle to a [TextBlob], compared by identity.
    TextBlobHandle,
    TextBlob
);

impl ParagraphHandle {
    /// Bounds of the paragraph drawn at `offset`.
    pub fn bounds_at(&self, offset: Offset) -> Rect {
        Rect::from_xywh(offset.dx, offset.dy, self.0.width(), self.0.height())
    }
}

impl TextBlobHandle {
    /// Bounds of the blob drawn at `offset`.
    pub fn bounds_at(&self, offset: Offset) -> Rect {
        self.0.bounds().shift(offset)
    }
}
