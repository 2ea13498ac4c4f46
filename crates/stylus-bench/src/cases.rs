//! Benchmark case table.
//!
//! Each case issues one draw call per iteration; positions walk a fixed
//! pseudo-random sequence so repeated calls do not overdraw a single spot.

use std::fmt;

use clap::ValueEnum;
use stylus_engine::error::Result as DrawResult;
use stylus_engine::{
    BlendMode, Canvas, Color, Font, Image, Matrix, Path, PathDirection, Point, PointMode, Rect, Recording,
    TextBlob, TextEncoding, Typeface,
};

/// Which paints are attached while a case runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum DrawingType {
    AttachPen,
    AttachBrush,
    AttachBoth,
}

impl DrawingType {
    pub const ALL: [DrawingType; 3] = [DrawingType::AttachPen, DrawingType::AttachBrush, DrawingType::AttachBoth];

    pub fn uses_pen(self) -> bool {
        matches!(self, DrawingType::AttachPen | DrawingType::AttachBoth)
    }

    pub fn uses_brush(self) -> bool {
        matches!(self, DrawingType::AttachBrush | DrawingType::AttachBoth)
    }
}

impl fmt::Display for DrawingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawingType::AttachPen => "pen",
            DrawingType::AttachBrush => "brush",
            DrawingType::AttachBoth => "both",
        })
    }
}

/// Shared inputs built once per run.
pub struct Fixtures {
    pub blob: TextBlob,
    pub image: Image,
    pub star: Path,
    /// A small badge scene in a 100x100 box, replayed by the `playback` case.
    pub scene: Recording,
}

impl Fixtures {
    pub fn new() -> anyhow::Result<Self> {
        let font = Font::new(Typeface::Builtin, 24.0)?;
        let blob = TextBlob::make_from_string("The quick brown fox jumps", &font, TextEncoding::Utf8)?;
        let star = star(Point::new(50.0, 50.0), 45.0, 5);
        let label = TextBlob::make_from_string("OK", &Font::new(Typeface::Builtin, 18.0)?, TextEncoding::Utf8)?;
        let scene = badge(&star, &label);
        Ok(Self { blob, image: checkerboard(64, 8)?, star, scene })
    }
}

fn badge(star: &Path, label: &TextBlob) -> Recording {
    let mut rec = Recording::new();
    rec.save()
        .clip_rect(Rect::from_xywh(0.0, 0.0, 100.0, 100.0))
        .draw_circle(50.0, 50.0, 48.0)
        .draw_path(star)
        .draw_text_blob(label, 36.0, 58.0)
        .restore();
    rec
}

fn checkerboard(size: u32, cell: u32) -> anyhow::Result<Image> {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            data.extend_from_slice(if on { &[30, 30, 30, 255] } else { &[230, 200, 40, 255] });
        }
    }
    Ok(Image::from_rgba8(size, size, &data)?)
}

fn star(center: Point, radius: f32, points: usize) -> Path {
    let mut path = Path::new();
    let step = std::f32::consts::PI * 2.0 / points as f32;
    for i in 0..points {
        // every second vertex of a regular polygon traces the star
        let a = (i * 2 % points) as f32 * step - std::f32::consts::FRAC_PI_2;
        let (x, y) = (center.x + radius * a.cos(), center.y + radius * a.sin());
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close();
    path
}

/// Per-iteration placement.
#[derive(Debug, Copy, Clone)]
pub struct Frame {
    pub index: u32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    /// Deterministic top-left corner for a `w`×`h` shape inside the surface.
    pub fn origin(&self, w: f32, h: f32) -> Point {
        let seed = self.index.wrapping_mul(2_654_435_761);
        let span_x = (self.width - w).max(1.0);
        let span_y = (self.height - h).max(1.0);
        Point::new((seed % 10_007) as f32 % span_x, ((seed >> 13) % 10_007) as f32 % span_y)
    }
}

pub type CaseFn = fn(&mut Canvas, &Fixtures, Frame) -> DrawResult<()>;

pub struct Case {
    pub name: &'static str,
    pub run: CaseFn,
}

pub const CASES: &[Case] = &[
    Case { name: "draw_rect", run: draw_rect },
    Case { name: "draw_round_rect", run: draw_round_rect },
    Case { name: "draw_circle", run: draw_circle },
    Case { name: "draw_oval", run: draw_oval },
    Case { name: "draw_arc", run: draw_arc },
    Case { name: "draw_line", run: draw_line },
    Case { name: "draw_points", run: draw_points },
    Case { name: "draw_path", run: draw_path },
    Case { name: "add_path", run: add_path },
    Case { name: "draw_text_blob", run: draw_text_blob },
    Case { name: "draw_image", run: draw_image },
    Case { name: "draw_color", run: draw_color },
    Case { name: "rotated_rect", run: rotated_rect },
    Case { name: "playback", run: playback },
];

fn draw_rect(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(120.0, 80.0);
    canvas.draw_rect(Rect::from_xywh(o.x, o.y, 120.0, 80.0))
}

fn draw_round_rect(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(120.0, 80.0);
    canvas.draw_round_rect(Rect::from_xywh(o.x, o.y, 120.0, 80.0), 16.0, 12.0)
}

fn draw_circle(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(100.0, 100.0);
    canvas.draw_circle(o.x + 50.0, o.y + 50.0, 50.0)
}

fn draw_oval(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(140.0, 70.0);
    canvas.draw_oval(Rect::from_xywh(o.x, o.y, 140.0, 70.0))
}

fn draw_arc(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(100.0, 100.0);
    let start = (f.index % 360) as f32;
    canvas.draw_arc(Rect::from_xywh(o.x, o.y, 100.0, 100.0), start, 270.0)
}

fn draw_line(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(150.0, 150.0);
    canvas.draw_line(o.x, o.y, o.x + 150.0, o.y + 150.0)
}

fn draw_points(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(100.0, 100.0);
    let pts: Vec<Point> = (0..8)
        .map(|i| {
            let a = i as f32 * std::f32::consts::FRAC_PI_4;
            Point::new(o.x + 50.0 + 45.0 * a.cos(), o.y + 50.0 + 45.0 * a.sin())
        })
        .collect();
    let mode = match f.index % 3 {
        0 => PointMode::Points,
        1 => PointMode::Lines,
        _ => PointMode::Polygon,
    };
    canvas.draw_points(mode, &pts)
}

fn draw_path(canvas: &mut Canvas, fx: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(100.0, 100.0);
    canvas.save();
    canvas.translate(o.x, o.y);
    let r = canvas.draw_path(&fx.star);
    canvas.restore();
    r
}

/// Appends a curved contour to a growing path, then draws the result.
fn add_path(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let mut base = Path::new();
    base.add_rect(Rect::from_xywh(0.0, 0.0, 60.0, 40.0), PathDirection::Cw);

    let mut extra = Path::new();
    extra.move_to(10.0, 50.0).cubic_to(30.0, 20.0, 50.0, 80.0, 70.0, 50.0).quad_to(40.0, 90.0, 10.0, 50.0);
    extra.transform(&Matrix::rotate(60.0, 40.0, 50.0));
    base.add_path(&extra);

    let o = f.origin(100.0, 100.0);
    base.offset(o.x, o.y);
    canvas.draw_path(&base)
}

fn draw_text_blob(canvas: &mut Canvas, fx: &Fixtures, f: Frame) -> DrawResult<()> {
    let b = fx.blob.bounds();
    let o = f.origin(b.width(), b.height());
    canvas.draw_text_blob(&fx.blob, o.x - b.left, o.y - b.top)
}

fn draw_image(canvas: &mut Canvas, fx: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(96.0, 96.0);
    canvas.draw_image_rect(&fx.image, Rect::from_xywh(o.x, o.y, 96.0, 96.0))
}

fn draw_color(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let shade = (f.index % 256) as u8;
    canvas.draw_color_with_mode(Color::from_argb(24, shade, 0, 255 - shade), BlendMode::SrcOver)
}

fn rotated_rect(canvas: &mut Canvas, _: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(120.0, 120.0);
    canvas.save();
    canvas.rotate((f.index * 7 % 360) as f32, o.x + 60.0, o.y + 60.0);
    let r = canvas.draw_rect(Rect::from_xywh(o.x + 20.0, o.y + 30.0, 80.0, 60.0));
    canvas.restore();
    r
}

/// Replays the recorded badge scene at a new position each iteration.
fn playback(canvas: &mut Canvas, fx: &Fixtures, f: Frame) -> DrawResult<()> {
    let o = f.origin(100.0, 100.0);
    canvas.save();
    canvas.translate(o.x, o.y);
    let r = fx.scene.playback(canvas);
    canvas.restore();
    r
}

#[cfg(test)]
mod tests {
    use stylus_engine::{Bitmap, Brush, ImageInfo, Pen};

    use super::*;

    #[test]
    fn case_names_are_unique() {
        let mut names: Vec<_> = CASES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CASES.len());
    }

    #[test]
    fn origins_stay_inside_surface() {
        for index in 0..500 {
            let f = Frame { index, width: 320.0, height: 240.0 };
            let o = f.origin(100.0, 80.0);
            assert!(o.x >= 0.0 && o.x + 100.0 <= 320.0, "{o:?}");
            assert!(o.y >= 0.0 && o.y + 80.0 <= 240.0, "{o:?}");
        }
    }

    #[test]
    fn star_is_closed_five_point_path() {
        let s = star(Point::new(0.0, 0.0), 10.0, 5);
        // move + 4 lines + closing line + close
        assert_eq!(s.verb_count(), 7);
        assert!(s.contains(0.0, 0.0));
    }

    #[test]
    fn playback_replays_scene_at_frame_origin() {
        let fx = Fixtures::new().unwrap();
        assert_eq!(fx.scene.len(), 6);

        let bm = Bitmap::new(ImageInfo::rgba_premul(100, 100)).unwrap();
        let mut canvas = Canvas::from_bitmap(&bm);
        canvas.attach_brush(&Brush::with_color(Color::RED));
        let depth = canvas.save_count();
        // a surface the size of the scene pins the origin to (0, 0)
        playback(&mut canvas, &fx, Frame { index: 0, width: 100.0, height: 100.0 }).unwrap();
        assert_eq!(canvas.save_count(), depth);
        assert_eq!(bm.read_pixel(50, 10), Ok(Color::RED));
        assert_eq!(bm.read_pixel(0, 0), Ok(Color::TRANSPARENT));
    }

    #[test]
    fn every_case_draws_with_both_paints() {
        let fx = Fixtures::new().unwrap();
        for case in CASES {
            let bm = Bitmap::new(ImageInfo::rgba_premul(240, 240)).unwrap();
            let mut canvas = Canvas::from_bitmap(&bm);
            canvas.attach_pen(&Pen::with_color_width(Color::BLUE, 3.0).unwrap());
            canvas.attach_brush(&Brush::with_color(Color::RED));
            for index in 0..3 {
                (case.run)(&mut canvas, &fx, Frame { index, width: 240.0, height: 240.0 }).unwrap();
            }
            let touched = bm.to_rgba8().unwrap().chunks_exact(4).any(|px| px[3] != 0);
            assert!(touched, "{} left the surface blank", case.name);
        }
    }
}
