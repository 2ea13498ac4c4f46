use crate::error::ValidationError;

use super::{BlendMode, Color, ColorFilter, PaintStyle};

/// Shape drawn at the open ends of a stroked contour.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Square,
    Round,
}

impl TryFrom<u32> for LineCap {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LineCap::Butt),
            1 => Ok(LineCap::Square),
            2 => Ok(LineCap::Round),
            _ => Err(ValidationError::UnknownEnumValue { kind: "line cap", value }),
        }
    }
}

/// Shape drawn where two stroked segments meet.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum LineJoin {
    #[default]
    Miter = 0,
    Round,
    Bevel,
}

impl TryFrom<u32> for LineJoin {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LineJoin::Miter),
            1 => Ok(LineJoin::Round),
            2 => Ok(LineJoin::Bevel),
            _ => Err(ValidationError::UnknownEnumValue { kind: "line join", value }),
        }
    }
}

pub const DEFAULT_MITER_LIMIT: f32 = 4.0;

/// Stroke style: paints shape outlines.
///
/// A width of `0` draws a hairline one device pixel wide regardless of the
/// canvas transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    style: PaintStyle,
    width: f32,
    cap: LineCap,
    join: LineJoin,
    miter_limit: f32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            style: PaintStyle::default(),
            width: 0.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: DEFAULT_MITER_LIMIT,
        }
    }
}

impl Pen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pen of `color` and stroke `width`.
    pub fn with_color_width(color: Color, width: f32) -> Result<Self, ValidationError> {
        let mut pen = Self::new();
        pen.set_color(color);
        pen.set_width(width)?;
        Ok(pen)
    }

    #[inline]
    pub fn style(&self) -> &PaintStyle {
        &self.style
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Rejects negative and non-finite widths.
    pub fn set_width(&mut self, width: f32) -> Result<(), ValidationError> {
        if !width.is_finite() || width < 0.0 {
            return Err(ValidationError::NegativeStrokeWidth(width));
        }
        self.width = width;
        Ok(())
    }

    #[inline]
    pub fn cap(&self) -> LineCap {
        self.cap
    }

    #[inline]
    pub fn set_cap(&mut self, cap: LineCap) {
        self.cap = cap;
    }

    pub fn set_cap_raw(&mut self, raw: u32) -> Result<(), ValidationError> {
        self.cap = LineCap::try_from(raw)?;
        Ok(())
    }

    #[inline]
    pub fn join(&self) -> LineJoin {
        self.join
    }

    #[inline]
    pub fn set_join(&mut self, join: LineJoin) {
        self.join = join;
    }

    pub fn set_join_raw(&mut self, raw: u32) -> Result<(), ValidationError> {
        self.join = LineJoin::try_from(raw)?;
        Ok(())
    }

    #[inline]
    pub fn miter_limit(&self) -> f32 {
        self.miter_limit
    }

    pub fn set_miter_limit(&mut self, limit: f32) -> Result<(), ValidationError> {
        if !limit.is_finite() || limit < 0.0 {
            return Err(ValidationError::InvalidMiterLimit(limit));
        }
        self.miter_limit = limit;
        Ok(())
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.style.color()
    }

    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.style.set_color(color);
    }

    #[inline]
    pub fn alpha(&self) -> u8 {
        self.style.alpha()
    }

    pub fn set_alpha(&mut self, alpha: u32) -> Result<(), ValidationError> {
        self.style.set_alpha(alpha)
    }

    #[inline]
    pub fn is_anti_alias(&self) -> bool {
        self.style.is_anti_alias()
    }

    #[inline]
    pub fn set_anti_alias(&mut self, aa: bool) {
        self.style.set_anti_alias(aa);
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.style.blend_mode()
    }

    #[inline]
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.style.set_blend_mode(mode);
    }

    pub fn set_blend_mode_raw(&mut self, raw: u32) -> Result<(), ValidationError> {
        self.style.set_blend_mode_raw(raw)
    }

    #[inline]
    pub fn color_filter(&self) -> Option<&ColorFilter> {
        self.style.color_filter()
    }

    #[inline]
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.style.set_color_filter(filter);
    }

    #[inline]
    pub fn is_dither(&self) -> bool {
        self.style.is_dither()
    }

    #[inline]
    pub fn set_dither(&mut self, dither: bool) {
        self.style.set_dither(dither);
    }

    /// Restores every property to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
