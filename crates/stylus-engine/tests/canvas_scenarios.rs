//! End-to-end drawing scenarios against real bitmaps.

use std::thread;

use stylus_engine::paint::Rgba;
use stylus_engine::{
    create_compose_color_filter, AlphaType, Bitmap, BlendMode, Brush, Canvas, Color, ColorFilter, DrawError, Font,
    GeometryError, Image, ImageInfo, Path, Pen, PixelFormat, Point, PointMode, Rect, SurfaceError, TextBlob, TextEncoding, Typeface,
};

fn bitmap(w: u32, h: u32) -> Bitmap {
    Bitmap::new(ImageInfo::rgba_premul(w, h)).unwrap()
}

fn count(bm: &Bitmap, c: Color) -> usize {
    bm.to_rgba8()
        .unwrap()
        .chunks_exact(4)
        .filter(|px| *px == [c.r, c.g, c.b, c.a])
        .count()
}

/// Small deterministic generator so sequences vary without extra dependencies.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn coord(&mut self) -> f32 {
        (self.next() % 400) as f32 - 50.0
    }
}

// ── path properties ───────────────────────────────────────────────────────

#[test_log::test]
fn verb_count_equals_calls_plus_closes() {
    for seed in 0..256 {
        let mut rng = Lcg(seed);
        let mut path = Path::new();
        let mut calls = 0;
        let mut closes = 0;

        // verbs may come before any move_to or right after a close
        for _ in 0..(rng.next() % 40) {
            match rng.next() % 5 {
                0 => {
                    path.move_to(rng.coord(), rng.coord());
                }
                1 => {
                    path.line_to(rng.coord(), rng.coord());
                }
                2 => {
                    path.quad_to(rng.coord(), rng.coord(), rng.coord(), rng.coord());
                }
                3 => {
                    path.cubic_to(rng.coord(), rng.coord(), rng.coord(), rng.coord(), rng.coord(), rng.coord());
                }
                _ => {
                    path.close();
                    closes += 1;
                }
            }
            calls += 1;
        }
        assert_eq!(path.verb_count(), calls + closes, "seed {seed}");
    }
}

#[test_log::test]
fn verb_count_holds_for_edge_sequences() {
    let mut leading = Path::new();
    leading.line_to(1.0, 1.0);
    assert_eq!(leading.verb_count(), 1);

    let mut only_close = Path::new();
    only_close.close();
    assert_eq!(only_close.verb_count(), 2);

    let mut reopened = Path::new();
    reopened.move_to(0.0, 0.0).line_to(5.0, 0.0).close().line_to(5.0, 5.0);
    assert_eq!(reopened.verb_count(), 5);

    let mut double = Path::new();
    double.quad_to(1.0, 1.0, 2.0, 0.0).close().close().cubic_to(1.0, 1.0, 2.0, 2.0, 3.0, 3.0);
    assert_eq!(double.verb_count(), 3 + 4);
}

#[test_log::test]
fn reset_path_is_indistinguishable_from_new() {
    let mut path = Path::new();
    path.move_to(1.0, 1.0).cubic_to(5.0, 0.0, 9.0, 9.0, 3.0, 3.0).close();
    path.arc_to(0.0, 0.0, 10.0, 10.0, 45.0, 400.0);
    path.reset();

    let fresh = Path::new();
    assert_eq!(path, fresh);
    assert_eq!(path.verb_count(), fresh.verb_count());
    assert_eq!(path.bounds(), fresh.bounds());
    assert_eq!(path.last_point(), fresh.last_point());
    assert_eq!(path.fill_type(), fresh.fill_type());
    assert!(!path.contains(5.0, 5.0));
}

// ── attachment ────────────────────────────────────────────────────────────

#[test_log::test]
fn detaching_never_attached_paint_is_noop() {
    let bm = bitmap(8, 8);
    let mut canvas = Canvas::from_bitmap(&bm);
    canvas.detach_pen();
    canvas.detach_brush();
    canvas.attach_pen(&Pen::new());
    canvas.detach_pen();
    canvas.detach_pen();
    canvas.draw_rect(Rect::new(0.0, 0.0, 8.0, 8.0)).unwrap();
    assert_eq!(count(&bm, Color::TRANSPARENT), 64);
}

// ── color fills ───────────────────────────────────────────────────────────

#[test_log::test]
fn draw_color_fills_opaque_buffer_exactly() {
    for format in [PixelFormat::Rgba8888, PixelFormat::Bgra8888] {
        let bm = Bitmap::new(ImageInfo::new(33, 17, format, AlphaType::Opaque)).unwrap();
        let mut canvas = Canvas::from_bitmap(&bm);
        // attached paints do not influence draw_color
        canvas.attach_brush(&Brush::with_color(Color::BLUE));
        let c = Color::from_argb(255, 12, 200, 77);
        canvas.draw_color(c).unwrap();
        assert_eq!(count(&bm, c), 33 * 17, "{format:?}");
    }
}

// ── color filters ─────────────────────────────────────────────────────────

#[test_log::test]
fn compose_filter_is_outer_of_inner() {
    let inner = ColorFilter::srgb_gamma_to_linear();
    let outer = ColorFilter::blend(Color::from_argb(128, 0, 0, 255), BlendMode::SrcOver);
    let composed = create_compose_color_filter(&outer, &inner);

    for x in [
        Rgba::new(0.2, 0.4, 0.6, 1.0),
        Rgba::new(1.0, 0.0, 0.5, 0.5),
        Rgba::new(0.0, 0.0, 0.0, 0.0),
    ] {
        assert_eq!(composed.filter(x), outer.filter(inner.filter(x)));
    }
}

#[test_log::test]
fn brush_color_filter_changes_drawn_color() {
    let bm = bitmap(10, 10);
    let mut canvas = Canvas::from_bitmap(&bm);
    let mut brush = Brush::with_color(Color::RED);
    brush.set_color_filter(Some(ColorFilter::blend(Color::GREEN, BlendMode::Src)));
    canvas.attach_brush(&brush);
    canvas.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert_eq!(count(&bm, Color::GREEN), 100);
}

#[test_log::test]
fn multiply_blend_darkens_destination() {
    let bm = bitmap(4, 4);
    bm.erase(Color::from_argb(255, 200, 200, 200)).unwrap();
    let mut canvas = Canvas::from_bitmap(&bm);
    let mut brush = Brush::with_color(Color::from_argb(255, 128, 255, 0));
    brush.set_blend_mode(BlendMode::Multiply);
    canvas.attach_brush(&brush);
    canvas.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0)).unwrap();
    let px = bm.read_pixel(1, 1).unwrap();
    assert!((px.r as i32 - 100).abs() <= 1, "{px:?}");
    assert_eq!((px.g, px.b, px.a), (200, 0, 255));
}

// ── example scenarios ─────────────────────────────────────────────────────

#[test_log::test]
fn red_pen_strokes_diagonal_without_fill() {
    let bm = bitmap(320, 320);
    let mut canvas = Canvas::from_bitmap(&bm);
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(300.0, 300.0);
    canvas.attach_pen(&Pen::with_color_width(Color::RED, 10.0).unwrap());
    canvas.draw_path(&path).unwrap();

    // on the centerline
    for t in [5, 100, 150, 290] {
        assert_eq!(bm.read_pixel(t, t), Ok(Color::RED), "({t}, {t})");
    }
    // within half the width of the centerline
    assert_eq!(bm.read_pixel(152, 148), Ok(Color::RED));
    // beyond half the width
    assert_eq!(bm.read_pixel(157, 143), Ok(Color::TRANSPARENT));
    // no fill, nothing past the butt ends
    assert_eq!(bm.read_pixel(250, 50), Ok(Color::TRANSPARENT));
    assert_eq!(bm.read_pixel(310, 310), Ok(Color::TRANSPARENT));

    let red = count(&bm, Color::RED);
    let expected = 300.0 * 2f32.sqrt() * 10.0;
    assert!((red as f32 - expected).abs() < expected * 0.05, "{red} vs {expected}");
}

#[test_log::test]
fn red_brush_fills_square_without_outline() {
    let bm = bitmap(100, 100);
    let mut canvas = Canvas::from_bitmap(&bm);
    canvas.attach_brush(&Brush::with_color(Color::RED));
    canvas.draw_rect(Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();

    assert_eq!(count(&bm, Color::RED), 50 * 50);
    assert_eq!(bm.read_pixel(49, 49), Ok(Color::RED));
    assert_eq!(bm.read_pixel(50, 25), Ok(Color::TRANSPARENT));
    assert_eq!(bm.read_pixel(25, 50), Ok(Color::TRANSPARENT));
}

// ── failure semantics ─────────────────────────────────────────────────────

#[test_log::test]
fn released_buffer_fails_then_rebind_recovers() {
    let bm = bitmap(10, 10);
    let mut canvas = Canvas::from_bitmap(&bm);
    canvas.attach_brush(&Brush::with_color(Color::RED));
    bm.release();

    let err = canvas.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0)).unwrap_err();
    assert_eq!(err, DrawError::Surface(SurfaceError::Released));
    assert_eq!(canvas.draw_color(Color::WHITE), Err(DrawError::Surface(SurfaceError::Released)));

    let fresh = bitmap(10, 10);
    canvas.bind(&fresh);
    canvas.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0)).unwrap();
    assert_eq!(count(&fresh, Color::RED), 25);
}

#[test_log::test]
fn nan_path_is_rejected_and_path_stays_usable() {
    let bm = bitmap(20, 20);
    let mut canvas = Canvas::from_bitmap(&bm);
    canvas.attach_brush(&Brush::with_color(Color::RED));

    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(f32::NAN, 10.0);
    let err = canvas.draw_path(&path).unwrap_err();
    assert!(matches!(err, DrawError::Geometry(GeometryError::NonFinite { index: 1, .. })));
    assert_eq!(count(&bm, Color::TRANSPARENT), 400);

    path.reset();
    path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0).close();
    canvas.draw_path(&path).unwrap();
    assert!(count(&bm, Color::RED) > 0);
}

#[test_log::test]
fn malformed_text_is_an_encoding_error() {
    let font = Font::new(Typeface::Builtin, 16.0).unwrap();
    let err = TextBlob::make_from_string([0xC3, 0x28], &font, TextEncoding::Utf8).unwrap_err();
    let as_draw: DrawError = err.clone().into();
    assert!(matches!(as_draw, DrawError::Encoding(_)));
}

// ── concurrency ───────────────────────────────────────────────────────────

#[test_log::test]
fn extreme_finite_coordinates_draw_nothing_and_do_not_fail() {
    let bm = bitmap(32, 32);
    let mut canvas = Canvas::from_bitmap(&bm);
    canvas.attach_pen(&Pen::with_color_width(Color::RED, 4.0).unwrap());
    canvas.attach_brush(&Brush::with_color(Color::BLUE));

    let font = Font::new(Typeface::Builtin, 16.0).unwrap();
    let blob = TextBlob::make_from_string("overflow", &font, TextEncoding::Utf8).unwrap();
    let image = Image::from_rgba8(2, 2, &[255; 16]).unwrap();

    for v in [3.0e9, -3.0e9, f32::MAX, f32::MIN] {
        canvas.draw_text_blob(&blob, v, 10.0).unwrap();
        canvas.draw_text_blob(&blob, 10.0, v).unwrap();
        canvas.draw_points(PointMode::Points, &[Point::new(v, v), Point::new(v, 5.0)]).unwrap();
        canvas.draw_points(PointMode::Lines, &[Point::new(v, v), Point::new(v, -v)]).unwrap();
        canvas.draw_image(&image, v, 10.0).unwrap();
        canvas.draw_image(&image, 10.0, v).unwrap();
    }
    assert_eq!(count(&bm, Color::TRANSPARENT), 32 * 32);

    // the canvas still draws normally afterwards
    canvas.draw_text_blob(&blob, 2.0, 20.0).unwrap();
    assert!(count(&bm, Color::TRANSPARENT) < 32 * 32);
}

#[test_log::test]
fn one_blob_drawn_from_many_threads() {
    let font = Font::new(Typeface::Builtin, 18.0).unwrap();
    let blob = TextBlob::make_from_string("shared blob", &font, TextEncoding::Utf8).unwrap();
    let before = blob.clone();

    let outputs: Vec<Vec<u8>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    let bm = bitmap(160, 32);
                    let mut canvas = Canvas::from_bitmap(&bm);
                    canvas.attach_brush(&Brush::with_color(Color::BLACK));
                    canvas.draw_text_blob(&blob, 4.0, 24.0).unwrap();
                    bm.to_bytes().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    assert!(outputs[0].iter().any(|&b| b != 0));
    assert_eq!(blob, before);
}
