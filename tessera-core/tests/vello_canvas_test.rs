use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tessera_core::builder::DisplayListBuilder;
use tessera_core::canvas::{Canvas, SurfaceCanvas};
use tessera_core::config::RenderConfig;
use tessera_core::error::RenderError;
use tessera_core::image::{Image, RgbaImage};
use tessera_core::paint::{BlendMode, BlurStyle, ClipOp, Color, MaskFilter, Paint};
use tessera_core::path::Path;
use tessera_core::vgi::{Renderer, VelloCanvas, VelloRenderer};
use tessera_geometry::{transform, Offset, Rect, RoundedRect, Size};

fn surface() -> Size<u32> {
    Size {
        width: 64,
        height: 48,
    }
}

fn sample_list() -> tessera_core::display_list::DisplayList {
    let image = Image::new(RgbaImage::new(4, 4, vec![128; 64]).expect("4x4 image"));
    let rrect = RoundedRect::from_rect_xy(Rect::from_ltrb(4.0, 4.0, 40.0, 30.0), 6.0, 3.0);
    let mut path = Path::new();
    path.move_to(0.0, 0.0)
        .quad_to(10.0, 0.0, 10.0, 10.0)
        .cubic_to(10.0, 20.0, 0.0, 20.0, 0.0, 10.0)
        .close();

    let mut builder = DisplayListBuilder::new();
    builder.clear(Color::WHITE);
    builder.save();
    builder.rotate(0.25);
    builder.clip_rect(Rect::from_ltrb(2.0, 2.0, 60.0, 40.0), ClipOp::Intersect, true);
    builder.clip_rect(Rect::from_ltrb(10.0, 10.0, 12.0, 12.0), ClipOp::Difference, true);
    builder.clip_rrect(&rrect, true);
    builder.draw_rrect(&rrect, &Paint::fill(Color::BLACK));
    builder.draw_drrect(&rrect, &rrect.deflate(2.0), &Paint::default());
    builder.restore();
    builder.save_layer(None, &Paint::default().with_blend_mode(BlendMode::Multiply));
    builder.draw_path(&path, &Paint::stroke(Color::BLACK, 0.0));
    builder.draw_line(Offset::new(0.0, 0.0), Offset::new(20.0, 5.0), &Paint::default());
    builder.draw_circle(
        Offset::new(30.0, 20.0),
        8.0,
        &Paint::default().with_blend_mode(BlendMode::Screen),
    );
    builder.draw_rect(
        Rect::from_ltrb(5.0, 5.0, 15.0, 15.0),
        &Paint::default().with_mask_filter(Some(MaskFilter::blur(BlurStyle::Normal, 2.0))),
    );
    builder.draw_image(&image, Offset::new(1.0, 1.0), &Paint::default());
    builder.draw_image_rect(
        &image,
        Rect::from_ltrb(0.0, 0.0, 2.0, 2.0),
        Rect::from_ltrb(20.0, 20.0, 28.0, 28.0),
        &Paint::default(),
    );
    builder.draw_image_nine(
        &image,
        Rect::from_ltrb(1.0, 1.0, 3.0, 3.0),
        Rect::from_ltrb(0.0, 30.0, 40.0, 46.0),
        &Paint::default(),
    );
    builder.restore();
    builder.build()
}

#[test]
fn zero_sized_canvas_is_an_error() {
    let err = VelloCanvas::new(Size {
        width: 10,
        height: 0,
    })
    .err()
    .expect("zero height must fail");
    assert!(matches!(err, RenderError::InvalidSurfaceSize { .. }));
}

#[test]
fn every_operation_encodes_and_flushes() {
    let flushes = Arc::new(AtomicUsize::new(0));
    let seen = flushes.clone();
    let mut canvas = VelloCanvas::new(surface())
        .expect("canvas")
        .with_sink(move |_scene| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

    sample_list().dispatch(&mut canvas);
    assert_eq!(canvas.save_count(), 1);
    canvas.flush().expect("flush");
    canvas.flush().expect("second flush");
    assert_eq!(flushes.load(Ordering::SeqCst), 2);
}

#[test]
fn unbalanced_restores_are_ignored() {
    let mut canvas = VelloCanvas::new(surface()).expect("canvas");
    canvas.restore();
    canvas.restore();
    assert_eq!(canvas.save_count(), 1);

    canvas.save();
    canvas.save_layer(Some(Rect::from_ltrb(0.0, 0.0, 8.0, 8.0)), &Paint::default());
    canvas.clip_rect(Rect::from_ltrb(0.0, 0.0, 4.0, 4.0), ClipOp::Intersect, false);
    assert_eq!(canvas.save_count(), 3);
    canvas.restore_to_count(1);
    assert_eq!(canvas.save_count(), 1);
}

#[test]
fn flush_closes_open_saves() {
    let mut canvas = VelloCanvas::new(surface()).expect("canvas");
    canvas.save();
    canvas.transform(&transform::scaling(2.0, 2.0));
    canvas.clip_rect(Rect::from_ltrb(0.0, 0.0, 4.0, 4.0), ClipOp::Intersect, false);
    canvas.flush().expect("flush");
    assert_eq!(canvas.save_count(), 1);
    assert_eq!(canvas.size(), surface());
}

#[test]
fn sink_errors_are_reported() {
    let mut canvas = VelloCanvas::new(surface())
        .expect("canvas")
        .with_sink(|_scene| {
            Err(RenderError::flush_failed(std::io::Error::new(
                std::io::ErrorKind::Other,
                "presenter gone",
            )))
        });
    canvas.draw_rect(Rect::from_ltrb(0.0, 0.0, 4.0, 4.0), &Paint::default());
    assert!(matches!(canvas.flush(), Err(RenderError::FlushFailed { .. })));
}

#[test]
fn renderer_creates_matching_canvases() {
    let renderer = VelloRenderer::new(RenderConfig::fixed()).expect("vello backend");
    let mut canvas = renderer.create_canvas(surface()).expect("canvas");
    let mut recorder = renderer.create_recorder();
    recorder.draw_circle(Offset::new(5.0, 5.0), 3.0, &Paint::default());
    recorder.build().dispatch(&mut canvas);
    canvas.flush().expect("flush");

    assert!(matches!(
        renderer.create_canvas(Size {
            width: 0,
            height: 0
        }),
        Err(RenderError::InvalidSurfaceSize { .. })
    ));
}
