// SPDX-License-Identifier: LGPL-3.0-only

//! Drawing attribute bundles.
//!
//! A [Paint] is a plain value: two paints with equal fields are
//! interchangeable, and operations store their own copy.

pub use vello::peniko::Color;

/// How source and destination pixels are combined.
///
/// Porter-Duff compositing operators followed by the separable and
/// non-separable blend modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Both source and destination are dropped.
    Clear,
    /// Only the source is kept.
    Src,
    /// Only the destination is kept.
    Dst,
    /// Source over destination.
    #[default]
    SrcOver,
    /// Destination over source.
    DstOver,
    /// Source where the destination is opaque.
    SrcIn,
    /// Destination where the source is opaque.
    DstIn,
    /// Source where the destination is transparent.
    SrcOut,
    /// Destination where the source is transparent.
    DstOut,
    /// Source atop destination.
    SrcATop,
    /// Destination atop source.
    DstATop,
    /// Source and destination where they do not overlap.
    Xor,
    /// Sum of source and destination.
    Plus,
    /// Product of source and destination, including alpha.
    Modulate,
    /// Inverse of the product of the inverses.
    Screen,
    /// Multiply or screen depending on the destination.
    Overlay,
    /// Component-wise minimum.
    Darken,
    /// Component-wise maximum.
    Lighten,
    /// Brighten the destination toward the source.
    ColorDodge,
    /// Darken the destination toward the source.
    ColorBurn,
    /// Multiply or screen depending on the source.
    HardLight,
    /// Softer variant of hard light.
    SoftLight,
    /// Absolute difference of the components.
    Difference,
    /// Like difference, with lower contrast.
    Exclusion,
    /// Component-wise product.
    Multiply,
    /// Hue of the source, saturation and luminosity of the destination.
    Hue,
    /// Saturation of the source, hue and luminosity of the destination.
    Saturation,
    /// Hue and saturation of the source, luminosity of the destination.
    Color,
    /// Luminosity of the source, hue and saturation of the destination.
    Luminosity,
}

/// Whether shapes are filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaintStyle {
    /// Fill the interior.
    #[default]
    Fill,
    /// Stroke the outline.
    Stroke,
}

/// Decoration at the ends of open stroked segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeCap {
    /// Flat edge at the end point.
    #[default]
    Butt,
    /// Semicircle past the end point.
    Round,
    /// Half-square past the end point.
    Square,
}

/// Decoration where stroked segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeJoin {
    /// Sharp corner, limited by the miter limit.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Cut-off corner.
    Bevel,
}

/// Sampling quality for images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterQuality {
    /// Nearest neighbour.
    #[default]
    None,
    /// Bilinear.
    Low,
    /// Bilinear with mipmaps.
    Medium,
    /// Bicubic.
    High,
}

/// Which parts of a blurred shape are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlurStyle {
    /// Blur inside and outside the shape.
    #[default]
    Normal,
    /// Solid inside, blurred outside.
    Solid,
    /// Nothing inside, blurred outside.
    Outer,
    /// Blurred inside, nothing outside.
    Inner,
}

/// A filter applied to a shape's coverage before it is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskFilter {
    /// Gaussian blur with standard deviation `sigma`
    Blur {
        /// Which parts of the shape receive the blur
        style: BlurStyle,
        /// Standard deviation of the blur, in local units
        sigma: f32,
    },
}

impl MaskFilter {
    /// A blur mask filter.
    pub fn blur(style: BlurStyle, sigma: f32) -> Self {
        tessera_geometry::validate!(
            !(sigma < 0.0),
            "Blur sigma must not be negative, got {sigma}"
        );
        Self::Blur { style, sigma }
    }

    /// How far the filter can spread coverage outside the shape.
    pub fn outset(&self) -> f32 {
        match self {
            MaskFilter::Blur { sigma, .. } => sigma * 3.0,
        }
    }
}

/// How a clip shape combines with the current clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipOp {
    /// Keep only what is inside both.
    #[default]
    Intersect,
    /// Remove the shape from the current clip.
    Difference,
}

/// Attributes describing how a shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Color used to fill or stroke
    pub color: Color,
    /// How the drawing combines with what is already there
    pub blend_mode: BlendMode,
    /// Fill or stroke
    pub style: PaintStyle,
    /// Stroke width. Zero means a one pixel hairline.
    pub stroke_width: f32,
    /// Stroke end decoration
    pub stroke_cap: StrokeCap,
    /// Stroke corner decoration
    pub stroke_join: StrokeJoin,
    /// Ratio limiting how far miter joins may extend
    pub stroke_miter_limit: f32,
    /// If edges should be antialiased
    pub anti_alias: bool,
    /// Optional coverage filter
    pub mask_filter: Option<MaskFilter>,
    /// Image sampling quality
    pub filter_quality: FilterQuality,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            blend_mode: BlendMode::SrcOver,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            stroke_miter_limit: 4.0,
            anti_alias: true,
            mask_filter: None,
            filter_quality: FilterQuality::None,
        }
    }
}

impl Paint {
    /// Create a default paint.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fill paint of the given color.
    pub fn fill(color: Color) -> Self {
        Self::default().with_color(color)
    }

    /// A stroke paint of the given color and width.
    pub fn stroke(color: Color, width: f32) -> Self {
        Self::default()
            .with_color(color)
            .with_style(PaintStyle::Stroke)
            .with_stroke_width(width)
    }

    /// Set the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the blend mode.
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Set fill or stroke.
    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the stroke width.
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        tessera_geometry::validate!(
            !(width < 0.0),
            "Stroke width must not be negative, got {width}"
        );
        self.stroke_width = width;
        self
    }

    /// Set the stroke cap.
    pub fn with_stroke_cap(mut self, cap: StrokeCap) -> Self {
        self.stroke_cap = cap;
        self
    }

    /// Set the stroke join.
    pub fn with_stroke_join(mut self, join: StrokeJoin) -> Self {
        self.stroke_join = join;
        self
    }

    /// Set the miter limit.
    pub fn with_stroke_miter_limit(mut self, limit: f32) -> Self {
        self.stroke_miter_limit = limit;
        self
    }

    /// Enable or disable antialiasing.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Set or clear the mask filter.
    pub fn with_mask_filter(mut self, mask_filter: Option<MaskFilter>) -> Self {
        self.mask_filter = mask_filter;
        self
    }

    /// Set the image sampling quality.
    pub fn with_filter_quality(mut self, quality: FilterQuality) -> Self {
        self.filter_quality = quality;
        self
    }

    /// Whether shapes drawn with this paint are outlined.
    pub fn is_stroke(&self) -> bool {
        self.style == PaintStyle::Stroke
    }

    /// Opacity of the color, from 0 to 1.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// How far this paint can draw outside a shape's geometric bounds.
    ///
    /// Covers half the stroke width (a hairline counts as one unit), miter
    /// spikes, square caps and the spread of any mask filter.
    pub fn outset(&self) -> f32 {
        let mut outset = 0.0;
        if self.is_stroke() {
            let half = if self.stroke_width == 0.0 {
                0.5
            } else {
                self.stroke_width * 0.5
            };
            outset = match (self.stroke_join, self.stroke_cap) {
                (StrokeJoin::Miter, _) => half * self.stroke_miter_limit.max(1.0),
                (_, StrokeCap::Square) => half * std::f32::consts::SQRT_2,
                _ => half,
            };
        }
        if let Some(filter) = &self.mask_filter {
            outset += filter.outset();
        }
        outset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paint_is_opaque_black_fill() {
        let paint = Paint::default();
        assert_eq!(paint.color, Color::BLACK);
        assert_eq!(paint.blend_mode, BlendMode::SrcOver);
        assert_eq!(paint.style, PaintStyle::Fill);
        assert_eq!(paint.stroke_miter_limit, 4.0);
        assert!(paint.anti_alias);
        assert_eq!(paint.mask_filter, None);
        assert_eq!(paint.alpha(), 1.0);
    }

    #[test]
    fn paints_with_equal_fields_are_equal() {
        let a = Paint::stroke(Color::WHITE, 2.0).with_stroke_cap(StrokeCap::Round);
        let b = Paint::default()
            .with_color(Color::WHITE)
            .with_stroke_cap(StrokeCap::Round)
            .with_stroke_width(2.0)
            .with_style(PaintStyle::Stroke);
        assert_eq!(a, b);
        assert_ne!(a, b.with_anti_alias(false));
    }

    #[test]
    fn outset_accounts_for_stroke_and_blur() {
        assert_eq!(Paint::fill(Color::BLACK).outset(), 0.0);
        let round = Paint::stroke(Color::BLACK, 4.0).with_stroke_join(StrokeJoin::Round);
        assert_eq!(round.outset(), 2.0);
        let miter = Paint::stroke(Color::BLACK, 4.0);
        assert_eq!(miter.outset(), 8.0);
        let blurred = Paint::fill(Color::BLACK)
            .with_mask_filter(Some(MaskFilter::blur(BlurStyle::Normal, 2.0)));
        assert_eq!(blurred.outset(), 6.0);
    }
}
