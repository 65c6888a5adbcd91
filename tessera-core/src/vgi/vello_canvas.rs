// SPDX-License-Identifier: LGPL-3.0-only

//! A [SurfaceCanvas] that encodes into a [vello::Scene].

use tessera_geometry::{transform, Matrix4, Offset, Rect, RoundedRect, Size};
use vello::kurbo::{
    Affine, BezPath, Cap, Circle, Join, Line, Rect as KurboRect, RoundedRect as KurboRoundedRect,
    RoundedRectRadii, Shape, Stroke,
};
use vello::peniko::{self, Brush, Compose, Fill, ImageBrush, ImageQuality, Mix};
use vello::Scene;

use crate::canvas::{Canvas, SurfaceCanvas};
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::image::{nine_patch_lattice, Image};
use crate::paint::{BlendMode, ClipOp, Color, FilterQuality, MaskFilter, Paint, StrokeCap, StrokeJoin};
use crate::path::{Path, PathCommand, PathFillType};
use crate::text::{ParagraphHandle, TextBlobHandle};

/// Receives the finished scene on every [flush](SurfaceCanvas::flush).
pub type SceneSink = Box<dyn FnMut(&Scene) -> RenderResult<()> + Send>;

/// Tolerance used when flattening kurbo shapes into paths.
const PATH_TOLERANCE: f64 = 0.1;

struct Frame {
    matrix: Matrix4,
    /// Vello layers pushed since this frame was saved.
    layers: usize,
}

/// A canvas drawing straight into a vello scene.
///
/// Clips and saved layers become vello layers, which are popped again when
/// the save they belong to is restored. Transforms are flattened to 2D
/// affines; perspective components are dropped with a warning.
pub struct VelloCanvas {
    scene: Scene,
    size: Size<u32>,
    stack: Vec<Frame>,
    warn_unbalanced: bool,
    sink: Option<SceneSink>,
}

impl VelloCanvas {
    /// Create a canvas for a surface of `size` physical pixels.
    pub fn new(size: Size<u32>) -> RenderResult<Self> {
        Self::with_config(size, &RenderConfig::fixed())
    }

    /// Create a canvas using the given configuration.
    pub fn with_config(size: Size<u32>, config: &RenderConfig) -> RenderResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(RenderError::invalid_surface_size(size.width, size.height));
        }
        log::debug!("Creating {}x{} vello canvas", size.width, size.height);
        Ok(Self {
            scene: Scene::new(),
            size,
            stack: vec![Frame {
                matrix: Matrix4::identity(),
                layers: 0,
            }],
            warn_unbalanced: config.warn_unbalanced,
            sink: None,
        })
    }

    /// Hand every flushed scene to `sink`.
    pub fn with_sink(mut self, sink: impl FnMut(&Scene) -> RenderResult<()> + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// The scene encoded so far.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Consume the canvas and return its scene.
    pub fn into_scene(mut self) -> Scene {
        self.close_layers();
        self.scene
    }

    fn frame(&self) -> &Frame {
        // The base frame is never popped.
        &self.stack[self.stack.len() - 1]
    }

    fn frame_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn affine(&self) -> Affine {
        to_affine(&self.frame().matrix)
    }

    fn surface_rect(&self) -> KurboRect {
        KurboRect::new(0.0, 0.0, self.size.width as f64, self.size.height as f64)
    }

    fn concat(&mut self, matrix: &Matrix4) {
        let frame = self.frame_mut();
        frame.matrix = frame.matrix * matrix;
    }

    fn push_layer(&mut self, blend: peniko::BlendMode, alpha: f32, transform: Affine, shape: &impl Shape) {
        self.scene.push_layer(blend, alpha, transform, shape);
        self.frame_mut().layers += 1;
    }

    fn pop_frame_layers(&mut self) {
        let layers = std::mem::take(&mut self.frame_mut().layers);
        for _ in 0..layers {
            self.scene.pop_layer();
        }
    }

    /// Restore every save and pop any clip left on the base frame.
    fn close_layers(&mut self) {
        while self.stack.len() > 1 {
            self.pop_frame_layers();
            self.stack.pop();
        }
        self.pop_frame_layers();
    }

    /// Run `draw` inside a blend layer when the paint needs one.
    fn with_blend(&mut self, paint: &Paint, draw: impl FnOnce(&mut Scene, Affine)) {
        let affine = self.affine();
        if paint.blend_mode == BlendMode::SrcOver {
            draw(&mut self.scene, affine);
            return;
        }
        let surface = self.surface_rect();
        self.scene
            .push_layer(to_peniko_blend(paint.blend_mode), 1.0, Affine::IDENTITY, &surface);
        draw(&mut self.scene, affine);
        self.scene.pop_layer();
    }

    fn draw_shape(&mut self, shape: &impl Shape, fill: Fill, paint: &Paint) {
        let brush = Brush::Solid(paint.color);
        if paint.is_stroke() {
            let stroke = to_stroke(paint);
            self.with_blend(paint, |scene, affine| {
                scene.stroke(&stroke, affine, &brush, None, shape);
            });
        } else {
            self.with_blend(paint, |scene, affine| {
                scene.fill(fill, affine, &brush, None, shape);
            });
        }
    }

    /// Draw a blurred fill if the paint asks for one. Returns whether it did.
    fn draw_blurred(&mut self, rect: Rect, radius: f32, paint: &Paint) -> bool {
        let sigma = match paint.mask_filter {
            Some(MaskFilter::Blur { sigma, .. }) if !paint.is_stroke() && sigma > 0.0 => sigma,
            _ => return false,
        };
        let color = paint.color;
        let rect = to_kurbo_rect(rect);
        self.with_blend(paint, |scene, affine| {
            scene.draw_blurred_rounded_rect(affine, rect, color, radius as f64, sigma as f64);
        });
        true
    }

    fn draw_image_brush(&mut self, image: &Image, transform: Affine, paint: &Paint) {
        let Some(data) = image.native().image_data() else {
            log::debug!("Skipping image without vello pixel data: {:?}", image);
            return;
        };
        let brush = ImageBrush::new(data)
            .with_alpha(paint.alpha())
            .with_quality(to_image_quality(paint.filter_quality));
        self.with_blend(paint, |scene, affine| {
            scene.draw_image(&brush, affine * transform);
        });
    }

    fn draw_image_section(&mut self, image: &Image, src: Rect, dst: Rect, paint: &Paint) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let mapping = Affine::translate((dst.left() as f64, dst.top() as f64))
            * Affine::scale_non_uniform(
                (dst.width() / src.width()) as f64,
                (dst.height() / src.height()) as f64,
            )
            * Affine::translate((-src.left() as f64, -src.top() as f64));
        let affine = self.affine();
        self.scene
            .push_layer(Mix::Clip, 1.0, affine, &to_kurbo_rect(dst));
        self.draw_image_brush(image, mapping, paint);
        self.scene.pop_layer();
    }
}

impl Canvas for VelloCanvas {
    fn save(&mut self) {
        let matrix = self.frame().matrix;
        self.stack.push(Frame { matrix, layers: 0 });
    }

    fn save_layer(&mut self, bounds: Option<Rect>, paint: &Paint) {
        self.save();
        let blend = to_peniko_blend(paint.blend_mode);
        match bounds {
            Some(bounds) => {
                let affine = self.affine();
                self.push_layer(blend, paint.alpha(), affine, &to_kurbo_rect(bounds));
            },
            None => {
                let surface = self.surface_rect();
                self.push_layer(blend, paint.alpha(), Affine::IDENTITY, &surface);
            },
        }
    }

    fn restore(&mut self) {
        if self.stack.len() == 1 {
            if self.warn_unbalanced {
                log::warn!("restore() without a matching save(); ignoring");
            }
            return;
        }
        self.pop_frame_layers();
        self.stack.pop();
    }

    fn save_count(&self) -> usize {
        self.stack.len()
    }

    fn clear(&mut self, color: Color) {
        let surface = self.surface_rect();
        self.scene.push_layer(
            peniko::BlendMode::new(Mix::Normal, Compose::Copy),
            1.0,
            Affine::IDENTITY,
            &surface,
        );
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, &Brush::Solid(color), None, &surface);
        self.scene.pop_layer();
    }

    fn transform(&mut self, matrix: &Matrix4) {
        if !transform::is_affine(matrix) {
            log::warn!("Perspective transform flattened to 2D affine: {:?}", matrix);
        }
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
        match op {
            ClipOp::Intersect => {
                let affine = self.affine();
                self.push_layer(Mix::Clip.into(), 1.0, affine, &to_kurbo_rect(rect));
            },
            ClipOp::Difference => {
                let shape = difference_clip(self.surface_rect(), self.affine(), rect);
                self.push_layer(Mix::Clip.into(), 1.0, Affine::IDENTITY, &shape);
            },
        }
    }

    fn clip_rrect(&mut self, rrect: &RoundedRect, _anti_alias: bool) {
        let affine = self.affine();
        let shape = rrect_to_bez(rrect);
        self.push_layer(Mix::Clip.into(), 1.0, affine, &shape);
    }

    fn draw_line(&mut self, p1: Offset, p2: Offset, paint: &Paint) {
        let line = Line::new(to_kurbo_point(p1), to_kurbo_point(p2));
        let stroke = to_stroke(paint);
        let brush = Brush::Solid(paint.color);
        self.with_blend(paint, |scene, affine| {
            scene.stroke(&stroke, affine, &brush, None, &line);
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        if self.draw_blurred(rect, 0.0, paint) {
            return;
        }
        self.draw_shape(&to_kurbo_rect(rect), Fill::NonZero, paint);
    }

    fn draw_rrect(&mut self, rrect: &RoundedRect, paint: &Paint) {
        if self.draw_blurred(rrect.outer_rect(), rrect.scale_radii().tl_radius_x, paint) {
            return;
        }
        self.draw_shape(&rrect_to_bez(rrect), Fill::NonZero, paint);
    }

    fn draw_drrect(&mut self, outer: &RoundedRect, inner: &RoundedRect, paint: &Paint) {
        let mut path = Path::new();
        path.add_rrect(outer).add_rrect(inner);
        self.draw_shape(&path_to_bez(&path), Fill::EvenOdd, paint);
    }

    fn draw_circle(&mut self, center: Offset, radius: f32, paint: &Paint) {
        let circle = Circle::new(to_kurbo_point(center), radius as f64);
        self.draw_shape(&circle, Fill::NonZero, paint);
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        if path.is_empty() {
            return;
        }
        let fill = match path.fill_type() {
            PathFillType::NonZero => Fill::NonZero,
            PathFillType::EvenOdd => Fill::EvenOdd,
        };
        self.draw_shape(&path_to_bez(path), fill, paint);
    }

    fn draw_image(&mut self, image: &Image, offset: Offset, paint: &Paint) {
        let placement = Affine::translate((offset.dx as f64, offset.dy as f64));
        self.draw_image_brush(image, placement, paint);
    }

    fn draw_image_rect(&mut self, image: &Image, src: Rect, dst: Rect, paint: &Paint) {
        self.draw_image_section(image, src, dst, paint);
    }

    fn draw_image_nine(&mut self, image: &Image, center: Rect, dst: Rect, paint: &Paint) {
        for (src, dst) in nine_patch_lattice(image.size(), center, dst) {
            self.draw_image_section(image, src, dst, paint);
        }
    }

    fn draw_text_blob(&mut self, blob: &TextBlobHandle, offset: Offset, paint: &Paint) {
        blob.get().paint(self, offset, paint);
    }

    fn draw_paragraph(&mut self, paragraph: &ParagraphHandle, offset: Offset) {
        paragraph.get().paint(self, offset);
    }
}

impl SurfaceCanvas for VelloCanvas {
    fn size(&self) -> Size<u32> {
        self.size
    }

    /// Close open saves, hand the scene to the sink and start a new one.
    ///
    /// The transform and clip go back to their initial state.
    fn flush(&mut self) -> RenderResult<()> {
        if self.stack.len() > 1 && self.warn_unbalanced {
            log::warn!(
                "Flushing with {} unrestored save(s); restoring them",
                self.stack.len() - 1
            );
        }
        self.close_layers();
        self.frame_mut().matrix = Matrix4::identity();

        let result = match self.sink.as_mut() {
            Some(sink) => sink(&self.scene),
            None => Ok(()),
        };
        self.scene.reset();
        result
    }
}

/// Flatten a 4x4 transform to the 2D affine vello uses.
pub fn to_affine(m: &Matrix4) -> Affine {
    let s = m.as_slice();
    Affine::new([
        s[0] as f64,
        s[1] as f64,
        s[4] as f64,
        s[5] as f64,
        s[12] as f64,
        s[13] as f64,
    ])
}

fn to_kurbo_point(point: Offset) -> vello::kurbo::Point {
    vello::kurbo::Point::new(point.dx as f64, point.dy as f64)
}

fn to_kurbo_rect(rect: Rect) -> KurboRect {
    KurboRect::new(
        rect.left() as f64,
        rect.top() as f64,
        rect.right() as f64,
        rect.bottom() as f64,
    )
}

/// Convert a rounded rectangle, using kurbo's shape when every corner is
/// circular.
fn rrect_to_bez(rrect: &RoundedRect) -> BezPath {
    let scaled = rrect.scale_radii();
    let corners = [
        scaled.tl_radius(),
        scaled.tr_radius(),
        scaled.br_radius(),
        scaled.bl_radius(),
    ];
    if corners.iter().all(|r| r.x == r.y) {
        let radii = RoundedRectRadii::new(
            corners[0].x as f64,
            corners[1].x as f64,
            corners[2].x as f64,
            corners[3].x as f64,
        );
        KurboRoundedRect::from_rect(to_kurbo_rect(scaled.outer_rect()), radii)
            .to_path(PATH_TOLERANCE)
    } else {
        let mut path = Path::new();
        path.add_rrect(rrect);
        path_to_bez(&path)
    }
}

/// Convert a path to kurbo.
pub fn path_to_bez(path: &Path) -> BezPath {
    let pt = |p: &Offset| (p.dx as f64, p.dy as f64);
    let mut bez = BezPath::new();
    for command in path.commands() {
        match command {
            PathCommand::MoveTo(p) => bez.move_to(pt(p)),
            PathCommand::LineTo(p) => bez.line_to(pt(p)),
            PathCommand::QuadTo(c, p) => bez.quad_to(pt(c), pt(p)),
            PathCommand::CubicTo(c1, c2, p) => bez.curve_to(pt(c1), pt(c2), pt(p)),
            PathCommand::Close => bez.close_path(),
        }
    }
    bez
}

/// The surface minus `rect`, in device space.
///
/// The hole winds opposite to the surface so a non-zero fill leaves it out.
fn difference_clip(surface: KurboRect, affine: Affine, rect: Rect) -> BezPath {
    let mut bez = surface.to_path(PATH_TOLERANCE);

    let mut corners = [
        (rect.left(), rect.top()),
        (rect.left(), rect.bottom()),
        (rect.right(), rect.bottom()),
        (rect.right(), rect.top()),
    ]
    .map(|(x, y)| affine * vello::kurbo::Point::new(x as f64, y as f64));
    // Reflections flip the winding of the mapped corners.
    if affine.determinant() < 0.0 {
        corners.reverse();
    }

    bez.move_to(corners[0]);
    for corner in &corners[1..] {
        bez.line_to(*corner);
    }
    bez.close_path();
    bez
}

fn to_stroke(paint: &Paint) -> Stroke {
    let width = if paint.stroke_width == 0.0 {
        1.0
    } else {
        paint.stroke_width as f64
    };
    let cap = match paint.stroke_cap {
        StrokeCap::Butt => Cap::Butt,
        StrokeCap::Round => Cap::Round,
        StrokeCap::Square => Cap::Square,
    };
    let join = match paint.stroke_join {
        StrokeJoin::Miter => Join::Miter,
        StrokeJoin::Round => Join::Round,
        StrokeJoin::Bevel => Join::Bevel,
    };
    Stroke::new(width)
        .with_caps(cap)
        .with_join(join)
        .with_miter_limit(paint.stroke_miter_limit as f64)
}

fn to_image_quality(quality: FilterQuality) -> ImageQuality {
    match quality {
        FilterQuality::None => ImageQuality::Low,
        FilterQuality::Low | FilterQuality::Medium => ImageQuality::Medium,
        FilterQuality::High => ImageQuality::High,
    }
}

/// Map a blend mode to vello's mix and compose pair.
///
/// Vello has no modulate; it is approximated by multiply.
pub fn to_peniko_blend(mode: BlendMode) -> peniko::BlendMode {
    let compose = |compose| peniko::BlendMode::new(Mix::Normal, compose);
    let mix = |mix| peniko::BlendMode::new(mix, Compose::SrcOver);
    match mode {
        BlendMode::Clear => compose(Compose::Clear),
        BlendMode::Src => compose(Compose::Copy),
        BlendMode::Dst => compose(Compose::Dest),
        BlendMode::SrcOver => compose(Compose::SrcOver),
        BlendMode::DstOver => compose(Compose::DestOver),
        BlendMode::SrcIn => compose(Compose::SrcIn),
        BlendMode::DstIn => compose(Compose::DestIn),
        BlendMode::SrcOut => compose(Compose::SrcOut),
        BlendMode::DstOut => compose(Compose::DestOut),
        BlendMode::SrcATop => compose(Compose::SrcAtop),
        BlendMode::DstATop => compose(Compose::DestAtop),
        BlendMode::Xor => compose(Compose::Xor),
        BlendMode::Plus => compose(Compose::Plus),
        BlendMode::Modulate | BlendMode::Multiply => mix(Mix::Multiply),
        BlendMode::Screen => mix(Mix::Screen),
        BlendMode::Overlay => mix(Mix::Overlay),
        BlendMode::Darken => mix(Mix::Darken),
        BlendMode::Lighten => mix(Mix::Lighten),
        BlendMode::ColorDodge => mix(Mix::ColorDodge),
        BlendMode::ColorBurn => mix(Mix::ColorBurn),
        BlendMode::HardLight => mix(Mix::HardLight),
        BlendMode::SoftLight => mix(Mix::SoftLight),
        BlendMode::Difference => mix(Mix::Difference),
        BlendMode::Exclusion => mix(Mix::Exclusion),
        BlendMode::Hue => mix(Mix::Hue),
        BlendMode::Saturation => mix(Mix::Saturation),
        BlendMode::Color => mix(Mix::Color),
        BlendMode::Luminosity => mix(Mix::Luminosity),
    }
}
