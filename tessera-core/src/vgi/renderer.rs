// SPDX-License-Identifier: LGPL-3.0-only

//! Factories handing out canvases, recorders and paths.

use tessera_geometry::Size;

use super::backend::Backend;
use super::vello_canvas::VelloCanvas;
use crate::builder::DisplayListBuilder;
use crate::canvas::SurfaceCanvas;
use crate::config::{AaConfig, RenderConfig};
use crate::error::{RenderError, RenderResult};
use crate::path::Path;
use crate::text::ParagraphBuilder;

/// Creates paragraph builders for a text engine.
pub type ParagraphBuilderFactory = Box<dyn Fn() -> Box<dyn ParagraphBuilder> + Send + Sync>;

/// A rendering backend.
///
/// Recorders and paths are backend independent, so the provided methods
/// serve every implementation; only surface canvases differ.
pub trait Renderer {
    /// The canvas type drawing onto this backend's surfaces.
    type Canvas: SurfaceCanvas;

    /// The configuration this renderer was created with.
    fn config(&self) -> &RenderConfig;

    /// Create a canvas for a surface of `size` physical pixels.
    fn create_canvas(&self, size: Size<u32>) -> RenderResult<Self::Canvas>;

    /// Create an empty recorder.
    fn create_recorder(&self) -> DisplayListBuilder {
        DisplayListBuilder::with_capacity(self.config().builder_capacity)
    }

    /// Create an empty path.
    fn create_path(&self) -> Path {
        Path::new()
    }

    /// Create a paragraph builder, if a text engine is attached.
    fn create_paragraph_builder(&self) -> Option<Box<dyn ParagraphBuilder>> {
        None
    }

    /// The backend this renderer implements.
    fn backend(&self) -> &Backend {
        &self.config().backend
    }
}

/// The vello renderer.
pub struct VelloRenderer {
    config: RenderConfig,
    text_engine: Option<ParagraphBuilderFactory>,
}

impl VelloRenderer {
    /// Create a renderer from `config`.
    ///
    /// Fails if the configuration names a backend other than vello.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        if let Backend::Custom(name) = &config.backend {
            return Err(RenderError::unsupported_backend(name.clone()));
        }
        log::info!("Using vello renderer");
        Ok(Self {
            config,
            text_engine: None,
        })
    }

    /// Create a renderer configured from the environment.
    pub fn from_env() -> RenderResult<Self> {
        Self::new(RenderConfig::default())
    }

    /// Attach a text engine producing paragraph builders.
    pub fn with_text_engine(
        mut self,
        factory: impl Fn() -> Box<dyn ParagraphBuilder> + Send + Sync + 'static,
    ) -> Self {
        self.text_engine = Some(Box::new(factory));
        self
    }

    /// The antialiasing method the GPU renderer should use for scenes from
    /// this renderer.
    pub fn antialiasing(&self) -> &AaConfig {
        &self.config.antialiasing
    }
}

impl Renderer for VelloRenderer {
    type Canvas = VelloCanvas;

    fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn create_canvas(&self, size: Size<u32>) -> RenderResult<VelloCanvas> {
        VelloCanvas::with_config(size, &self.config)
    }

    fn create_paragraph_builder(&self) -> Option<Box<dyn ParagraphBuilder>> {
        self.text_engine.as_ref().map(|factory| factory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::paint::Paint;
    use crate::text::{Paragraph, ParagraphHandle};
    use tessera_geometry::Offset;

    #[test]
    fn custom_backends_are_refused() {
        let config = RenderConfig {
            backend: Backend::Custom("skia".to_string()),
            ..RenderConfig::fixed()
        };
        assert!(matches!(
            VelloRenderer::new(config),
            Err(RenderError::UnsupportedBackend { name }) if name == "skia"
        ));
    }

    #[test]
    fn recorders_use_the_configured_capacity() {
        let config = RenderConfig {
            builder_capacity: 4,
            ..RenderConfig::fixed()
        };
        let renderer = VelloRenderer::new(config).expect("vello backend");
        let recorder = renderer.create_recorder();
        assert!(recorder.is_empty());
        assert_eq!(recorder.save_count(), 1);
        assert!(renderer.create_path().is_empty());
        assert_eq!(renderer.backend(), &Backend::Vello);
        assert!(renderer.create_paragraph_builder().is_none());
    }

    #[derive(Debug)]
    struct Line {
        text: String,
        max_width: f32,
    }

    impl Paragraph for Line {
        fn width(&self) -> f32 {
            (self.text.len() as f32 * 6.0).min(self.max_width)
        }

        fn height(&self) -> f32 {
            10.0
        }

        fn paint(&self, _canvas: &mut dyn Canvas, _offset: Offset) {}
    }

    #[derive(Default)]
    struct LineBuilder(String);

    impl ParagraphBuilder for LineBuilder {
        fn push_style(&mut self, _paint: &Paint, _font_size: f32) {}

        fn pop_style(&mut self) {}

        fn add_text(&mut self, text: &str) {
            self.0.push_str(text);
        }

        fn build(self: Box<Self>, max_width: f32) -> ParagraphHandle {
            ParagraphHandle::new(Line {
                text: self.0,
                max_width,
            })
        }
    }

    #[test]
    fn attached_text_engine_builds_paragraphs() {
        let renderer = VelloRenderer::new(RenderConfig::fixed())
            .expect("vello backend")
            .with_text_engine(|| -> Box<dyn ParagraphBuilder> { Box::new(LineBuilder::default()) });
        let mut builder = renderer.create_paragraph_builder().expect("text engine");
        builder.push_style(&Paint::default(), 12.0);
        builder.add_text("hello");
        builder.pop_style();
        let paragraph = builder.build(20.0);
        assert_eq!(paragraph.get().width(), 20.0);
        assert_eq!(paragraph.bounds_at(Offset::ZERO).height(), 10.0);

        let mut builder = renderer.create_paragraph_builder().expect("text engine");
        builder.add_text("hi");
        assert_eq!(builder.build(20.0).get().width(), 12.0);
    }
}
