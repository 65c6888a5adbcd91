// SPDX-License-Identifier: LGPL-3.0-only

//! Opaque image handles.
//!
//! Decoding lives outside tessera. Display lists only store [Image] handles
//! and pass them back to the canvas that replays them.

use std::fmt;
use std::sync::Arc;

use tessera_geometry::{Rect, Size};
use vello::peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};

use crate::error::{RenderError, RenderResult};

/// A decoded image supplied by the embedder.
pub trait NativeImage: Send + Sync + fmt::Debug {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Pixel data for the vello backend, if the image can provide it.
    fn image_data(&self) -> Option<ImageData> {
        None
    }
}

/// A shared, immutable image handle.
///
/// Cloning shares the underlying image. Two handles are equal only when they
/// point at the same image.
#[derive(Clone)]
pub struct Image {
    native: Arc<dyn NativeImage>,
}

impl Image {
    /// Wrap a native image.
    pub fn new(native: impl NativeImage + 'static) -> Self {
        Self {
            native: Arc::new(native),
        }
    }

    /// Wrap an already shared native image.
    pub fn from_arc(native: Arc<dyn NativeImage>) -> Self {
        Self { native }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.native.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.native.height()
    }

    /// Size in pixels.
    pub fn size(&self) -> Size<u32> {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// The full image as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(Default::default(), self.size().cast_f32())
    }

    /// The wrapped image.
    pub fn native(&self) -> &dyn NativeImage {
        self.native.as_ref()
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.native, &other.native)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Image").field(&self.native).finish()
    }
}

/// Straight-alpha RGBA8 pixels held in memory.
#[derive(Clone)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Blob<u8>,
}

impl RgbaImage {
    /// Wrap a pixel buffer of exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> RenderResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(4));
        match expected {
            Some(expected) if expected == pixels.len() => Ok(Self {
                width,
                height,
                data: Blob::from(pixels),
            }),
            _ => Err(RenderError::invalid_image_data(
                width,
                height,
                expected.unwrap_or(usize::MAX),
                pixels.len(),
            )),
        }
    }

    /// The raw pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        self.data.data()
    }
}

impl fmt::Debug for RgbaImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RgbaImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl NativeImage for RgbaImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn image_data(&self) -> Option<ImageData> {
        Some(ImageData {
            data: self.data.clone(),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: self.width,
            height: self.height,
        })
    }
}

/// Split a nine-slice draw into `(src, dst)` rectangle pairs.
///
/// `center` is the stretchable region in image pixels. The four corners keep
/// their size, the edges stretch along one axis and the center along both.
/// When `dst` is too small for the fixed parts they shrink proportionally and
/// the center disappears. Empty cells are omitted.
pub fn nine_patch_lattice(image: Size<u32>, center: Rect, dst: Rect) -> Vec<(Rect, Rect)> {
    let width = image.width as f32;
    let height = image.height as f32;

    let center_left = center.left().max(0.0).min(width);
    let center_right = center.right().max(center_left).min(width);
    let center_top = center.top().max(0.0).min(height);
    let center_bottom = center.bottom().max(center_top).min(height);

    let xs = lattice_divs(
        [0.0, center_left, center_right, width],
        dst.left(),
        dst.right(),
    );
    let ys = lattice_divs(
        [0.0, center_top, center_bottom, height],
        dst.top(),
        dst.bottom(),
    );

    let mut cells = Vec::with_capacity(9);
    for row in 0..3 {
        for col in 0..3 {
            let src = Rect::from_ltrb(xs.0[col], ys.0[row], xs.0[col + 1], ys.0[row + 1]);
            let dst = Rect::from_ltrb(xs.1[col], ys.1[row], xs.1[col + 1], ys.1[row + 1]);
            if !src.is_empty() && !dst.is_empty() {
                cells.push((src, dst));
            }
        }
    }
    cells
}

/// Source and destination divisions along one axis.
fn lattice_divs(src: [f32; 4], start: f32, end: f32) -> ([f32; 4], [f32; 4]) {
    let leading = src[1] - src[0];
    let trailing = src[3] - src[2];
    let available = end - start;
    let fixed = leading + trailing;
    let scale = if fixed > available && fixed > 0.0 {
        available.max(0.0) / fixed
    } else {
        1.0
    };
    let dst = [
        start,
        start + leading * scale,
        end - trailing * scale,
        end,
    ];
    (src, dst)
}
