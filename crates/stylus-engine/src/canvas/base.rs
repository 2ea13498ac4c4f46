use crate::config::RasterConfig;
use crate::coords::{IntRect, Matrix, Rect};
use crate::error::{GeometryError, Result, SurfaceError, ValidationError};
use crate::paint::{Brush, Color, Pen};
use crate::surface::Bitmap;

use super::state::{AttachMode, AttachState, DeviceState};

/// Drawing surface bound to one [`Bitmap`].
///
/// Draw calls use whichever of pen and brush are attached: the brush fills,
/// then the pen strokes. With neither attached a draw call does nothing.
///
/// A canvas is not internally synchronized; share it across threads only
/// behind the caller's own lock.
#[derive(Debug, Default)]
pub struct Canvas {
    pub(super) target: Option<Bitmap>,
    pub(super) attached: AttachState,
    pub(super) device: DeviceState,
    saved: Vec<DeviceState>,
    pub(super) config: RasterConfig,
}

impl Canvas {
    /// Unbound canvas; every draw fails with [`SurfaceError::Unbound`] until [`bind`](Self::bind).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RasterConfig) -> std::result::Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config, ..Self::default() })
    }

    pub fn from_bitmap(bitmap: &Bitmap) -> Self {
        let mut canvas = Self::new();
        canvas.bind(bitmap);
        canvas
    }

    // ── target ────────────────────────────────────────────────────────────

    /// Binds to `bitmap`, replacing any previous target. Paint, matrix and clip are kept.
    pub fn bind(&mut self, bitmap: &Bitmap) {
        log::trace!("canvas bound to {}x{} bitmap", bitmap.width(), bitmap.height());
        self.target = Some(bitmap.clone());
    }

    pub fn unbind(&mut self) -> Option<Bitmap> {
        self.target.take()
    }

    #[inline]
    pub fn target(&self) -> Option<&Bitmap> {
        self.target.as_ref()
    }

    /// Width of the bound bitmap, `0` when unbound.
    #[inline]
    pub fn width(&self) -> u32 {
        self.target.as_ref().map_or(0, Bitmap::width)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.target.as_ref().map_or(0, Bitmap::height)
    }

    #[inline]
    pub fn config(&self) -> RasterConfig {
        self.config
    }

    pub fn read_pixel(&self, x: u32, y: u32) -> std::result::Result<Color, SurfaceError> {
        self.target.as_ref().ok_or(SurfaceError::Unbound)?.read_pixel(x, y)
    }

    // ── paint attachment ──────────────────────────────────────────────────

    /// Draws with a copy of `pen` until detached or replaced.
    pub fn attach_pen(&mut self, pen: &Pen) {
        self.attached.pen = Some(pen.clone());
    }

    /// No-op when no pen is attached.
    pub fn detach_pen(&mut self) {
        if self.attached.pen.take().is_none() {
            log::trace!("detach_pen: no pen attached");
        }
    }

    pub fn attach_brush(&mut self, brush: &Brush) {
        self.attached.brush = Some(brush.clone());
    }

    /// No-op when no brush is attached.
    pub fn detach_brush(&mut self) {
        if self.attached.brush.take().is_none() {
            log::trace!("detach_brush: no brush attached");
        }
    }

    #[inline]
    pub fn attach_mode(&self) -> AttachMode {
        self.attached.mode()
    }

    #[inline]
    pub fn attached_pen(&self) -> Option<&Pen> {
        self.attached.pen.as_ref()
    }

    #[inline]
    pub fn attached_brush(&self) -> Option<&Brush> {
        self.attached.brush.as_ref()
    }

    // ── save stack ────────────────────────────────────────────────────────

    /// Pushes matrix and clip. Returns the save count before the push.
    pub fn save(&mut self) -> usize {
        let count = self.save_count();
        self.saved.push(self.device);
        count
    }

    /// Pops matrix and clip. Ignored at the bottom of the stack.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.device = state,
            None => log::trace!("restore: save stack is empty"),
        }
    }

    /// Number of saved states plus one.
    #[inline]
    pub fn save_count(&self) -> usize {
        self.saved.len() + 1
    }

    pub fn restore_to_count(&mut self, count: usize) {
        while self.save_count() > count.max(1) {
            self.restore();
        }
    }

    // ── transform ─────────────────────────────────────────────────────────

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(&Matrix::translate(dx, dy));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(&Matrix::scale(sx, sy));
    }

    /// Rotates by `degrees` clockwise (y down) around `(px, py)`.
    pub fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.concat(&Matrix::rotate(degrees, px, py));
    }

    /// Pre-concatenates `m`: it applies to geometry before the current matrix.
    pub fn concat(&mut self, m: &Matrix) {
        self.device.matrix = self.device.matrix.concat(*m);
    }

    pub fn set_matrix(&mut self, m: &Matrix) {
        self.device.matrix = *m;
    }

    pub fn reset_matrix(&mut self) {
        self.device.matrix = Matrix::identity();
    }

    #[inline]
    pub fn total_matrix(&self) -> Matrix {
        self.device.matrix
    }

    // ── clip ──────────────────────────────────────────────────────────────

    /// Intersects the clip with the device-space bounds of `rect` under the current matrix.
    pub fn clip_rect(&mut self, rect: Rect) -> Result<()> {
        if !rect.is_finite() {
            return Err(GeometryError::NonFiniteArgument("clip_rect").into());
        }
        self.device.clip_to(rect);
        Ok(())
    }

    /// Device-space clip bounds, `None` when nothing is drawable.
    pub fn device_clip_bounds(&self) -> Option<IntRect> {
        self.target.as_ref().and_then(|bm| self.device_clip(bm))
    }

    pub(super) fn device_clip(&self, bitmap: &Bitmap) -> Option<IntRect> {
        let full = IntRect::from_size(bitmap.width(), bitmap.height());
        match self.device.clip {
            None => Some(full),
            Some(c) => IntRect::new(
                c.left.round() as i32,
                c.top.round() as i32,
                c.right.round() as i32,
                c.bottom.round() as i32,
            )
            .intersect(full),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ImageInfo;

    fn bitmap() -> Bitmap {
        Bitmap::new(ImageInfo::rgba_premul(100, 80)).unwrap()
    }

    // ── binding ───────────────────────────────────────────────────────────

    #[test]
    fn dimensions_follow_target() {
        let mut c = Canvas::new();
        assert_eq!((c.width(), c.height()), (0, 0));
        c.bind(&bitmap());
        assert_eq!((c.width(), c.height()), (100, 80));
        assert!(c.unbind().is_some());
        assert_eq!(c.read_pixel(0, 0), Err(SurfaceError::Unbound));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RasterConfig { tolerance: 0.25, aa_samples: 0 };
        assert!(Canvas::with_config(config).is_err());
    }

    // ── attachment ────────────────────────────────────────────────────────

    #[test]
    fn attach_copies_the_paint() {
        let mut c = Canvas::new();
        let mut pen = Pen::with_color_width(Color::RED, 2.0).unwrap();
        c.attach_pen(&pen);
        pen.set_color(Color::BLUE);
        assert_eq!(c.attached_pen().map(Pen::color), Some(Color::RED));
    }

    #[test]
    fn detach_without_attach_is_noop() {
        let mut c = Canvas::new();
        c.detach_pen();
        c.detach_brush();
        c.attach_brush(&Brush::new());
        c.detach_brush();
        c.detach_brush();
        assert_eq!(c.attach_mode(), AttachMode::Unattached);
    }

    // ── save / restore ────────────────────────────────────────────────────

    #[test]
    fn restore_returns_previous_matrix_and_clip() {
        let mut c = Canvas::from_bitmap(&bitmap());
        let before = c.save();
        assert_eq!(before, 1);
        c.translate(10.0, 5.0);
        c.clip_rect(Rect::new(0.0, 0.0, 20.0, 20.0)).unwrap();
        assert_eq!(c.device_clip_bounds(), Some(IntRect::new(10, 5, 30, 25)));
        c.restore();
        assert_eq!(c.total_matrix(), Matrix::identity());
        assert_eq!(c.device_clip_bounds(), Some(IntRect::new(0, 0, 100, 80)));
        c.restore();
        assert_eq!(c.save_count(), 1);
    }

    #[test]
    fn restore_to_count_unwinds_several_levels() {
        let mut c = Canvas::new();
        c.save();
        let mark = c.save();
        c.save();
        c.scale(2.0, 2.0);
        c.restore_to_count(mark);
        assert_eq!(c.save_count(), 2);
        c.restore_to_count(0);
        assert_eq!(c.save_count(), 1);
    }

    #[test]
    fn concat_applies_new_transform_first() {
        let mut c = Canvas::new();
        c.translate(10.0, 0.0);
        c.scale(2.0, 2.0);
        let p = c.total_matrix().map_point((1.0, 1.0).into());
        assert_eq!((p.x, p.y), (12.0, 2.0));
    }

    #[test]
    fn non_finite_clip_is_rejected() {
        let mut c = Canvas::new();
        assert!(c.clip_rect(Rect::new(0.0, f32::NAN, 1.0, 1.0)).is_err());
    }
}
