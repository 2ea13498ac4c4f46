use std::sync::Arc;

use crate::canvas::{Canvas, PointMode};
use crate::coords::{Point, Rect};
use crate::error::Result;
use crate::paint::{BlendMode, Brush, Color, Pen};
use crate::path::Path;
use crate::surface::Image;
use crate::text::TextBlob;

use super::DrawCmd;

/// Recorded canvas operations, replayable onto any canvas.
///
/// Performance characteristics:
/// - recording is O(1) per operation; paints and blobs are cloned, paths are shared
/// - playback runs commands in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    cmds: Vec<DrawCmd>,
}

impl Recording {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all commands. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) -> &mut Self {
        self.cmds.push(cmd);
        self
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn attach_pen(&mut self, pen: &Pen) -> &mut Self {
        self.push(DrawCmd::AttachPen(pen.clone()))
    }

    pub fn detach_pen(&mut self) -> &mut Self {
        self.push(DrawCmd::DetachPen)
    }

    pub fn attach_brush(&mut self, brush: &Brush) -> &mut Self {
        self.push(DrawCmd::AttachBrush(brush.clone()))
    }

    pub fn detach_brush(&mut self) -> &mut Self {
        self.push(DrawCmd::DetachBrush)
    }

    pub fn save(&mut self) -> &mut Self {
        self.push(DrawCmd::Save)
    }

    pub fn restore(&mut self) -> &mut Self {
        self.push(DrawCmd::Restore)
    }

    pub fn translate(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.push(DrawCmd::Translate { dx, dy })
    }

    pub fn scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.push(DrawCmd::Scale { sx, sy })
    }

    pub fn rotate(&mut self, degrees: f32, px: f32, py: f32) -> &mut Self {
        self.push(DrawCmd::Rotate { degrees, px, py })
    }

    pub fn clip_rect(&mut self, rect: Rect) -> &mut Self {
        self.push(DrawCmd::ClipRect(rect))
    }

    // ── primitives ────────────────────────────────────────────────────────

    pub fn draw_rect(&mut self, rect: Rect) -> &mut Self {
        self.push(DrawCmd::Rect(rect))
    }

    pub fn draw_round_rect(&mut self, rect: Rect, rx: f32, ry: f32) -> &mut Self {
        self.push(DrawCmd::RoundRect { rect, rx, ry })
    }

    pub fn draw_circle(&mut self, x: f32, y: f32, radius: f32) -> &mut Self {
        self.push(DrawCmd::Circle { center: Point::new(x, y), radius })
    }

    pub fn draw_oval(&mut self, oval: Rect) -> &mut Self {
        self.push(DrawCmd::Oval(oval))
    }

    pub fn draw_arc(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32) -> &mut Self {
        self.push(DrawCmd::Arc { oval, start_angle, sweep_angle })
    }

    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> &mut Self {
        self.push(DrawCmd::Line { from: Point::new(x0, y0), to: Point::new(x1, y1) })
    }

    pub fn draw_point(&mut self, x: f32, y: f32) -> &mut Self {
        self.push(DrawCmd::Point(Point::new(x, y)))
    }

    pub fn draw_points(&mut self, mode: PointMode, points: &[Point]) -> &mut Self {
        self.push(DrawCmd::Points { mode, points: Arc::from(points) })
    }

    /// Records the path as it is now; later edits to `path` are not seen.
    pub fn draw_path(&mut self, path: &Path) -> &mut Self {
        self.push(DrawCmd::Path(Arc::new(path.clone())))
    }

    pub fn draw_shared_path(&mut self, path: Arc<Path>) -> &mut Self {
        self.push(DrawCmd::Path(path))
    }

    pub fn draw_color(&mut self, color: Color, mode: BlendMode) -> &mut Self {
        self.push(DrawCmd::Color { color, mode })
    }

    pub fn clear_to(&mut self, color: Color) -> &mut Self {
        self.push(DrawCmd::Clear(color))
    }

    pub fn draw_text_blob(&mut self, blob: &TextBlob, x: f32, y: f32) -> &mut Self {
        self.push(DrawCmd::TextBlob { blob: blob.clone(), origin: Point::new(x, y) })
    }

    pub fn draw_image_rect(&mut self, image: &Image, dst: Rect) -> &mut Self {
        self.push(DrawCmd::Image { image: image.clone(), dst })
    }

    // ── playback ──────────────────────────────────────────────────────────

    /// Replays every command onto `canvas`, stopping at the first failure.
    pub fn playback(&self, canvas: &mut Canvas) -> Result<()> {
        log::trace!("playback of {} commands", self.cmds.len());
        for (i, cmd) in self.cmds.iter().enumerate() {
            apply(cmd, canvas).inspect_err(|e| log::debug!("playback stopped at command {i}: {e}"))?;
        }
        Ok(())
    }
}

fn apply(cmd: &DrawCmd, canvas: &mut Canvas) -> Result<()> {
    match cmd {
        DrawCmd::AttachPen(pen) => canvas.attach_pen(pen),
        DrawCmd::DetachPen => canvas.detach_pen(),
        DrawCmd::AttachBrush(brush) => canvas.attach_brush(brush),
        DrawCmd::DetachBrush => canvas.detach_brush(),
        DrawCmd::Save => {
            canvas.save();
        }
        DrawCmd::Restore => canvas.restore(),
        DrawCmd::Translate { dx, dy } => canvas.translate(*dx, *dy),
        DrawCmd::Scale { sx, sy } => canvas.scale(*sx, *sy),
        DrawCmd::Rotate { degrees, px, py } => canvas.rotate(*degrees, *px, *py),
        DrawCmd::ClipRect(rect) => canvas.clip_rect(*rect)?,
        DrawCmd::Rect(rect) => canvas.draw_rect(*rect)?,
        DrawCmd::RoundRect { rect, rx, ry } => canvas.draw_round_rect(*rect, *rx, *ry)?,
        DrawCmd::Circle { center, radius } => canvas.draw_circle(center.x, center.y, *radius)?,
        DrawCmd::Oval(oval) => canvas.draw_oval(*oval)?,
        DrawCmd::Arc { oval, start_angle, sweep_angle } => canvas.draw_arc(*oval, *start_angle, *sweep_angle)?,
        DrawCmd::Line { from, to } => canvas.draw_line(from.x, from.y, to.x, to.y)?,
        DrawCmd::Point(p) => canvas.draw_point(p.x, p.y)?,
        DrawCmd::Points { mode, points } => canvas.draw_points(*mode, points)?,
        DrawCmd::Path(path) => canvas.draw_path(path)?,
        DrawCmd::Color { color, mode } => canvas.draw_color_with_mode(*color, *mode)?,
        DrawCmd::Clear(color) => canvas.clear(*color)?,
        DrawCmd::TextBlob { blob, origin } => canvas.draw_text_blob(blob, origin.x, origin.y)?,
        DrawCmd::Image { image, dst } => canvas.draw_image_rect(image, *dst)?,
    }
    Ok(())
}
