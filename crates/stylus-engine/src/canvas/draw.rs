//! Draw primitives.
//!
//! Every primitive follows the same pipeline: validate arguments, check the
//! target, build device-space polygons (brush fill first, then pen stroke),
//! scan-convert to a coverage mask and composite.

use std::collections::HashMap;

use crate::coords::{IntRect, Matrix, Point, Rect};
use crate::error::{DrawError, GeometryError, Result, SurfaceError};
use crate::paint::{BlendMode, Color, LineCap, PaintStyle, Pen, PremulColor};
use crate::path::{dot_polygon, flatten, stroke_contours, FillType, Path, PathDirection, Polygon, StrokeStyle};
use crate::raster::{blit_mask, fill_polygons, Mask, Source};
use crate::surface::{Bitmap, Image};
use crate::text::{GlyphBitmap, TextBlob};

use super::Canvas;

/// Device size above which glyphs are rasterized at this size and magnified.
const MAX_GLYPH_RASTER_SIZE: f32 = 256.0;

/// How [`Canvas::draw_points`] interprets its input.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PointMode {
    /// Each point is a dot.
    #[default]
    Points,
    /// Consecutive pairs are independent segments.
    Lines,
    /// The points form one open polyline.
    Polygon,
}

fn finite(op: &'static str, values: &[f32]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFiniteArgument(op).into())
    }
}

fn map_polygons(polys: Vec<Polygon>, m: &Matrix) -> Vec<Polygon> {
    polys
        .into_iter()
        .map(|p| p.into_iter().map(|q| m.map_point(q)).collect())
        .collect()
}

impl Canvas {
    // ── shapes ────────────────────────────────────────────────────────────

    pub fn draw_path(&mut self, path: &Path) -> Result<()> {
        let r = self.draw_geometry("draw_path", path, true);
        report("draw_path", r)
    }

    pub fn draw_rect(&mut self, rect: Rect) -> Result<()> {
        let r = finite("draw_rect", &[rect.left, rect.top, rect.right, rect.bottom]).and_then(|_| {
            let mut path = Path::new();
            path.add_rect(rect.sorted(), PathDirection::Cw);
            self.draw_geometry("draw_rect", &path, true)
        });
        report("draw_rect", r)
    }

    pub fn draw_round_rect(&mut self, rect: Rect, rx: f32, ry: f32) -> Result<()> {
        let r = finite("draw_round_rect", &[rect.left, rect.top, rect.right, rect.bottom, rx, ry]).and_then(|_| {
            let mut path = Path::new();
            path.add_round_rect(rect, rx, ry);
            self.draw_geometry("draw_round_rect", &path, true)
        });
        report("draw_round_rect", r)
    }

    /// Circle centered at `(x, y)`. A non-positive radius draws nothing.
    pub fn draw_circle(&mut self, x: f32, y: f32, radius: f32) -> Result<()> {
        let r = finite("draw_circle", &[x, y, radius]).and_then(|_| {
            let mut path = Path::new();
            path.add_circle(x, y, radius, PathDirection::Cw);
            self.draw_geometry("draw_circle", &path, true)
        });
        report("draw_circle", r)
    }

    pub fn draw_oval(&mut self, oval: Rect) -> Result<()> {
        let r = finite("draw_oval", &[oval.left, oval.top, oval.right, oval.bottom]).and_then(|_| {
            let mut path = Path::new();
            path.add_oval(oval.sorted(), PathDirection::Cw);
            self.draw_geometry("draw_oval", &path, true)
        });
        report("draw_oval", r)
    }

    /// Arc of the ellipse in `oval`. The brush fills the region closed by the chord.
    pub fn draw_arc(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32) -> Result<()> {
        let r = finite("draw_arc", &[oval.left, oval.top, oval.right, oval.bottom, start_angle, sweep_angle])
            .and_then(|_| {
                let mut path = Path::new();
                path.add_arc(oval.sorted(), start_angle, sweep_angle);
                self.draw_geometry("draw_arc", &path, true)
            });
        report("draw_arc", r)
    }

    /// Straight segment. Only the pen contributes; a line has no interior.
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> Result<()> {
        let r = finite("draw_line", &[x0, y0, x1, y1]).and_then(|_| {
            let mut path = Path::new();
            path.move_to(x0, y0).line_to(x1, y1);
            self.draw_geometry("draw_line", &path, false)
        });
        report("draw_line", r)
    }

    /// Dot sized by the pen width (round when the pen cap is round).
    /// A brush alone draws a one-pixel dot.
    pub fn draw_point(&mut self, x: f32, y: f32) -> Result<()> {
        let r = finite("draw_point", &[x, y]).and_then(|_| self.draw_dots("draw_point", &[Point::new(x, y)]));
        report("draw_point", r)
    }

    pub fn draw_points(&mut self, mode: PointMode, points: &[Point]) -> Result<()> {
        let r = self.draw_points_inner(mode, points);
        report("draw_points", r)
    }

    fn draw_points_inner(&mut self, mode: PointMode, points: &[Point]) -> Result<()> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite { context: "draw_points", index }.into());
        }
        match mode {
            PointMode::Points => self.draw_dots("draw_points", points),
            PointMode::Lines => {
                let mut path = Path::new();
                for pair in points.chunks_exact(2) {
                    path.move_to(pair[0].x, pair[0].y).line_to(pair[1].x, pair[1].y);
                }
                self.draw_geometry("draw_points", &path, false)
            }
            PointMode::Polygon => {
                let mut path = Path::new();
                if let Some((first, rest)) = points.split_first() {
                    path.move_to(first.x, first.y);
                    for p in rest {
                        path.line_to(p.x, p.y);
                    }
                }
                self.draw_geometry("draw_points", &path, false)
            }
        }
    }

    // ── fills ─────────────────────────────────────────────────────────────

    /// Fills the clip with `color` using `SrcOver`, ignoring attached paints.
    pub fn draw_color(&mut self, color: Color) -> Result<()> {
        let r = self.fill_clip("draw_color", color, BlendMode::SrcOver);
        report("draw_color", r)
    }

    pub fn draw_color_with_mode(&mut self, color: Color, mode: BlendMode) -> Result<()> {
        let r = self.fill_clip("draw_color", color, mode);
        report("draw_color", r)
    }

    /// Replaces every pixel in the clip with `color`.
    pub fn clear(&mut self, color: Color) -> Result<()> {
        let r = self.fill_clip("clear", color, BlendMode::Src);
        report("clear", r)
    }

    fn fill_clip(&self, op: &'static str, color: Color, mode: BlendMode) -> Result<()> {
        let Some((bitmap, clip)) = self.begin(op)? else {
            return Ok(());
        };
        let mask = Mask::new(clip, vec![1.0; (clip.width() * clip.height()) as usize]);
        let src = Source::Solid(PremulColor::from(color));
        bitmap.with_pixmap_mut(|pm| blit_mask(pm, &mask, &src, mode, false))?;
        Ok(())
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Draws `blob` with its baseline origin at `(x, y)`.
    ///
    /// Glyph positions follow the full matrix; glyph images are rasterized
    /// upright at the matrix's scale.
    pub fn draw_text_blob(&mut self, blob: &TextBlob, x: f32, y: f32) -> Result<()> {
        let r = finite("draw_text_blob", &[x, y]).and_then(|_| self.draw_text_inner(blob, x, y));
        report("draw_text_blob", r)
    }

    fn draw_text_inner(&self, blob: &TextBlob, x: f32, y: f32) -> Result<()> {
        let Some((bitmap, clip)) = self.begin("draw_text_blob")? else {
            return Ok(());
        };
        let styles = self.paint_styles();
        if styles.is_empty() || blob.is_empty() {
            log::trace!("draw_text_blob: nothing to draw");
            return Ok(());
        }
        let m = self.device.matrix;
        let scale = m.approx_scale();
        if !(scale > 0.0) {
            return Ok(());
        }
        let size = blob.size() * scale;
        if !size.is_finite() {
            return Ok(());
        }
        let raster_size = size.min(MAX_GLYPH_RASTER_SIZE);
        let magnify = if raster_size > 0.0 { size / raster_size } else { 1.0 };

        let mut cache: HashMap<u16, GlyphBitmap> = HashMap::new();
        let mut placed = Vec::with_capacity(blob.glyphs().len());
        for g in blob.glyphs() {
            let origin = m.map_point(Point::new(x + g.x, y + g.y));
            if !origin.is_finite() {
                continue;
            }
            cache.entry(g.id).or_insert_with(|| blob.typeface().rasterize(g.id, raster_size));
            placed.push((g.id, origin.x.round(), origin.y.round()));
        }

        for style in styles {
            let src = Source::Solid(style.resolved_color());
            let masks: Vec<Mask> = placed
                .iter()
                .filter_map(|&(id, ox, oy)| {
                    let gb = cache.get(&id)?;
                    let left = ox + gb.left as f32 * magnify;
                    let top = oy + gb.top as f32 * magnify;
                    Mask::from_alpha8(left, top, magnify, gb.width, gb.height, &gb.coverage, style.is_anti_alias(), clip)
                })
                .collect();
            bitmap.with_pixmap_mut(|pm| {
                for mask in &masks {
                    blit_mask(pm, mask, &src, style.blend_mode(), style.is_dither());
                }
            })?;
        }
        Ok(())
    }

    // ── images ────────────────────────────────────────────────────────────

    /// Draws `image` unscaled with its top-left corner at `(left, top)`.
    pub fn draw_image(&mut self, image: &Image, left: f32, top: f32) -> Result<()> {
        let dst = Rect::from_xywh(left, top, image.width() as f32, image.height() as f32);
        self.draw_image_rect(image, dst)
    }

    /// Draws `image` scaled into `dst` with nearest-neighbour sampling.
    ///
    /// Uses the attached brush's paint, else the pen's, else defaults.
    pub fn draw_image_rect(&mut self, image: &Image, dst: Rect) -> Result<()> {
        let r = finite("draw_image_rect", &[dst.left, dst.top, dst.right, dst.bottom])
            .and_then(|_| self.draw_image_inner(image, dst.sorted()));
        report("draw_image_rect", r)
    }

    /// Draws a snapshot of `bitmap`. Drawing a bitmap into itself is allowed.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, left: f32, top: f32) -> Result<()> {
        let r = Image::from_bitmap(bitmap).map_err(DrawError::from);
        let image = report("draw_bitmap", r)?;
        self.draw_image(&image, left, top)
    }

    fn draw_image_inner(&self, image: &Image, dst: Rect) -> Result<()> {
        let Some((bitmap, clip)) = self.begin("draw_image_rect")? else {
            return Ok(());
        };
        let m = self.device.matrix;
        let Some(inverse_device) = m.invert() else {
            log::trace!("draw_image_rect: singular matrix");
            return Ok(());
        };
        if dst.is_empty() {
            return Ok(());
        }
        let to_image = Matrix::scale(image.width() as f32 / dst.width(), image.height() as f32 / dst.height())
            .concat(Matrix::translate(-dst.left, -dst.top));
        let inverse = to_image.concat(inverse_device);

        let default_style = PaintStyle::default();
        let style = self.paint_styles().into_iter().next().unwrap_or(&default_style);
        let corner = [
            Point::new(dst.left, dst.top),
            Point::new(dst.right, dst.top),
            Point::new(dst.right, dst.bottom),
            Point::new(dst.left, dst.bottom),
        ];
        let poly: Polygon = corner.iter().map(|&p| m.map_point(p)).collect();
        let Some(mask) = fill_polygons(&[poly], FillType::Winding, style.is_anti_alias(), self.config.aa_samples, clip)
        else {
            return Ok(());
        };
        let src = Source::Image { image, inverse, style };
        bitmap.with_pixmap_mut(|pm| blit_mask(pm, &mask, &src, style.blend_mode(), style.is_dither()))?;
        Ok(())
    }

    // ── pipeline ──────────────────────────────────────────────────────────

    /// Resolves the bound target and drawable area. `Ok(None)` means fully clipped.
    fn begin(&self, op: &'static str) -> Result<Option<(&Bitmap, IntRect)>> {
        let bitmap = self.target.as_ref().ok_or(SurfaceError::Unbound)?;
        bitmap.ensure_live()?;
        if !self.device.matrix.is_finite() {
            return Err(GeometryError::NonFiniteArgument("canvas matrix").into());
        }
        match self.device_clip(bitmap) {
            Some(clip) => Ok(Some((bitmap, clip))),
            None => {
                log::trace!("{op}: clipped out");
                Ok(None)
            }
        }
    }

    /// Attached paints in drawing order: brush, then pen.
    fn paint_styles(&self) -> Vec<&PaintStyle> {
        let brush = self.attached.brush.as_ref().map(|b| b.style());
        let pen = self.attached.pen.as_ref().map(|p| p.style());
        brush.into_iter().chain(pen).collect()
    }

    fn draw_geometry(&self, op: &'static str, path: &Path, fill: bool) -> Result<()> {
        path.validate()?;
        let Some((bitmap, clip)) = self.begin(op)? else {
            return Ok(());
        };
        if self.attached.is_empty() {
            log::trace!("{op}: no pen or brush attached");
            return Ok(());
        }
        if fill {
            if let Some(brush) = &self.attached.brush {
                let polys: Vec<Polygon> = flatten(path, &self.device.matrix, self.config.tolerance)
                    .into_iter()
                    .map(|c| c.points)
                    .collect();
                self.paint_polygons(bitmap, &polys, path.fill_type(), brush.style(), clip)?;
            }
        }
        if let Some(pen) = &self.attached.pen {
            let polys = self.stroke_polygons(path, pen);
            self.paint_polygons(bitmap, &polys, FillType::Winding, pen.style(), clip)?;
        }
        Ok(())
    }

    fn draw_dots(&self, op: &'static str, points: &[Point]) -> Result<()> {
        let Some((bitmap, clip)) = self.begin(op)? else {
            return Ok(());
        };
        if self.attached.is_empty() {
            log::trace!("{op}: no pen or brush attached");
            return Ok(());
        }
        let m = self.device.matrix;
        let tol = self.config.tolerance;
        if let Some(brush) = &self.attached.brush {
            let polys: Vec<Polygon> =
                points.iter().map(|&p| dot_polygon(m.map_point(p), 1.0, false, tol)).collect();
            self.paint_polygons(bitmap, &polys, FillType::Winding, brush.style(), clip)?;
        }
        if let Some(pen) = &self.attached.pen {
            let scale = m.approx_scale();
            if scale > 0.0 {
                let width = self.stroke_width(pen);
                let round = pen.cap() == LineCap::Round;
                let local: Vec<Polygon> =
                    points.iter().map(|&p| dot_polygon(p, width, round, tol / scale)).collect();
                self.paint_polygons(bitmap, &map_polygons(local, &m), FillType::Winding, pen.style(), clip)?;
            }
        }
        Ok(())
    }

    /// Pen width in local units; hairlines map to one device pixel.
    fn stroke_width(&self, pen: &Pen) -> f32 {
        if pen.width() > 0.0 {
            pen.width()
        } else {
            1.0 / self.device.matrix.approx_scale()
        }
    }

    /// Strokes in local space so non-uniform scales distort the outline, then maps to device.
    fn stroke_polygons(&self, path: &Path, pen: &Pen) -> Vec<Polygon> {
        let m = self.device.matrix;
        let scale = m.approx_scale();
        if !(scale > 0.0) {
            return Vec::new();
        }
        let tol = self.config.tolerance / scale;
        let contours = flatten(path, &Matrix::identity(), tol);
        let style = StrokeStyle {
            width: self.stroke_width(pen),
            cap: pen.cap(),
            join: pen.join(),
            miter_limit: pen.miter_limit(),
        };
        map_polygons(stroke_contours(&contours, &style, tol), &m)
    }

    fn paint_polygons(
        &self,
        bitmap: &Bitmap,
        polys: &[Polygon],
        rule: FillType,
        style: &PaintStyle,
        clip: IntRect,
    ) -> Result<()> {
        let Some(mask) = fill_polygons(polys, rule, style.is_anti_alias(), self.config.aa_samples, clip) else {
            return Ok(());
        };
        let src = Source::Solid(style.resolved_color());
        bitmap.with_pixmap_mut(|pm| blit_mask(pm, &mask, &src, style.blend_mode(), style.is_dither()))?;
        Ok(())
    }
}

fn report<T>(op: &'static str, r: Result<T>) -> Result<T> {
    if let Err(e) = &r {
        log::warn!("{op} failed: {e}");
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Brush;
    use crate::surface::ImageInfo;
    use crate::text::{Font, TextEncoding, Typeface};

    fn canvas(w: u32, h: u32) -> (Canvas, Bitmap) {
        let bm = Bitmap::new(ImageInfo::rgba_premul(w, h)).unwrap();
        (Canvas::from_bitmap(&bm), bm)
    }

    fn count(bm: &Bitmap, c: Color) -> usize {
        bm.to_rgba8().unwrap().chunks_exact(4).filter(|px| *px == [c.r, c.g, c.b, c.a]).count()
    }

    // ── dispatch ──────────────────────────────────────────────────────────

    #[test]
    fn unbound_canvas_fails_with_surface_error() {
        let mut c = Canvas::new();
        assert_eq!(c.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0)), Err(SurfaceError::Unbound.into()));
    }

    #[test]
    fn nothing_attached_is_a_noop() {
        let (mut c, bm) = canvas(10, 10);
        c.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(count(&bm, Color::TRANSPARENT), 100);
    }

    #[test]
    fn nan_rect_is_a_geometry_error() {
        let (mut c, _bm) = canvas(10, 10);
        c.attach_brush(&Brush::with_color(Color::RED));
        let err = c.draw_rect(Rect::new(0.0, f32::NAN, 5.0, 5.0)).unwrap_err();
        assert!(matches!(err, DrawError::Geometry(_)));
        // canvas stays usable
        c.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0)).unwrap();
    }

    // ── fills and strokes ─────────────────────────────────────────────────

    #[test]
    fn brush_then_pen_order() {
        let (mut c, bm) = canvas(20, 20);
        c.attach_brush(&Brush::with_color(Color::RED));
        c.attach_pen(&Pen::with_color_width(Color::BLUE, 2.0).unwrap());
        c.draw_rect(Rect::new(5.0, 5.0, 15.0, 15.0)).unwrap();
        // stroke covers the edge, fill shows in the middle
        assert_eq!(bm.read_pixel(5, 10), Ok(Color::BLUE));
        assert_eq!(bm.read_pixel(10, 10), Ok(Color::RED));
    }

    #[test]
    fn line_ignores_brush() {
        let (mut c, bm) = canvas(20, 20);
        c.attach_brush(&Brush::with_color(Color::RED));
        c.draw_line(0.0, 10.0, 20.0, 10.0).unwrap();
        assert_eq!(count(&bm, Color::TRANSPARENT), 400);
    }

    #[test]
    fn hairline_is_one_pixel_under_scale() {
        let (mut c, bm) = canvas(20, 20);
        c.scale(4.0, 4.0);
        c.attach_pen(&Pen::with_color_width(Color::RED, 0.0).unwrap());
        c.draw_line(0.0, 2.5, 5.0, 2.5).unwrap();
        let column: Vec<Color> = (0..20).map(|y| bm.read_pixel(10, y).unwrap()).collect();
        assert_eq!(column.iter().filter(|c| **c == Color::RED).count(), 1);
    }

    #[test]
    fn round_point_uses_pen_width() {
        let (mut c, bm) = canvas(20, 20);
        let mut pen = Pen::with_color_width(Color::GREEN, 6.0).unwrap();
        pen.set_cap(LineCap::Round);
        c.attach_pen(&pen);
        c.draw_point(10.0, 10.0).unwrap();
        assert_eq!(bm.read_pixel(10, 10), Ok(Color::GREEN));
        assert_eq!(bm.read_pixel(7, 7), Ok(Color::TRANSPARENT));
        assert_eq!(bm.read_pixel(13, 10), Ok(Color::TRANSPARENT));
    }

    #[test]
    fn polygon_points_stroke_an_open_polyline() {
        let (mut c, bm) = canvas(20, 20);
        c.attach_pen(&Pen::with_color_width(Color::RED, 2.0).unwrap());
        let pts = [Point::new(2.0, 2.0), Point::new(18.0, 2.0), Point::new(18.0, 18.0)];
        c.draw_points(PointMode::Polygon, &pts).unwrap();
        assert_eq!(bm.read_pixel(10, 2), Ok(Color::RED));
        assert_eq!(bm.read_pixel(18, 10), Ok(Color::RED));
        assert_eq!(bm.read_pixel(10, 10), Ok(Color::TRANSPARENT));
    }

    // ── color fills ───────────────────────────────────────────────────────

    #[test]
    fn clear_respects_clip() {
        let (mut c, bm) = canvas(10, 10);
        c.clip_rect(Rect::new(0.0, 0.0, 5.0, 10.0)).unwrap();
        c.clear(Color::BLUE).unwrap();
        assert_eq!(count(&bm, Color::BLUE), 50);
    }

    #[test]
    fn draw_color_with_clear_mode_erases() {
        let (mut c, bm) = canvas(4, 4);
        c.draw_color(Color::RED).unwrap();
        c.draw_color_with_mode(Color::GREEN, BlendMode::Clear).unwrap();
        assert_eq!(count(&bm, Color::TRANSPARENT), 16);
    }

    // ── text and images ───────────────────────────────────────────────────

    #[test]
    fn text_blob_marks_pixels_near_baseline() {
        let (mut c, bm) = canvas(60, 30);
        c.attach_brush(&Brush::with_color(Color::BLACK));
        let font = Font::new(Typeface::Builtin, 20.0).unwrap();
        let blob = TextBlob::make_from_string("AB", &font, TextEncoding::Utf8).unwrap();
        c.draw_text_blob(&blob, 5.0, 25.0).unwrap();
        // top-left of the first box: x = 5 + 2, y = 25 - 14
        assert_eq!(bm.read_pixel(7, 11), Ok(Color::BLACK));
        assert_eq!(bm.read_pixel(7, 26), Ok(Color::TRANSPARENT));
    }

    #[test]
    fn text_far_off_surface_is_culled() {
        let (mut c, bm) = canvas(20, 20);
        c.attach_brush(&Brush::with_color(Color::BLACK));
        let font = Font::new(Typeface::Builtin, 20.0).unwrap();
        let blob = TextBlob::make_from_string("far", &font, TextEncoding::Utf8).unwrap();
        for (x, y) in [(3.0e9, 10.0), (-3.0e9, 10.0), (10.0, 3.0e9), (f32::MAX, f32::MAX)] {
            c.draw_text_blob(&blob, x, y).unwrap();
        }
        assert_eq!(count(&bm, Color::TRANSPARENT), 400);
    }

    #[test]
    fn huge_glyph_is_magnified_into_clip() {
        let (mut c, bm) = canvas(20, 20);
        c.attach_brush(&Brush::with_color(Color::BLACK));
        let font = Font::new(Typeface::Builtin, 1.0e5).unwrap();
        let blob = TextBlob::make_from_string("A", &font, TextEncoding::Utf8).unwrap();
        // the box's left border, thousands of pixels wide, spans the whole surface
        c.draw_text_blob(&blob, -10161.0, 30000.0).unwrap();
        assert_eq!(count(&bm, Color::BLACK), 400);
    }

    #[test]
    fn image_is_drawn_at_offset_and_scaled() {
        let (mut c, bm) = canvas(10, 10);
        let img = Image::from_rgba8(2, 1, &[255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
        c.draw_image(&img, 3.0, 4.0).unwrap();
        assert_eq!(bm.read_pixel(3, 4), Ok(Color::RED));
        assert_eq!(bm.read_pixel(4, 4), Ok(Color::BLUE));
        c.draw_image_rect(&img, Rect::new(0.0, 6.0, 4.0, 8.0)).unwrap();
        assert_eq!(bm.read_pixel(1, 7), Ok(Color::RED));
        assert_eq!(bm.read_pixel(2, 7), Ok(Color::BLUE));
    }

    #[test]
    fn bitmap_can_be_drawn_into_itself() {
        let (mut c, bm) = canvas(4, 4);
        c.save();
        c.clip_rect(Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        c.draw_color(Color::RED).unwrap();
        c.restore();
        c.draw_bitmap(&bm, 2.0, 2.0).unwrap();
        assert_eq!(bm.read_pixel(2, 2), Ok(Color::RED));
        assert_eq!(bm.read_pixel(3, 3), Ok(Color::TRANSPARENT));
    }
}
