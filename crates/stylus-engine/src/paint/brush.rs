use crate::error::ValidationError;

use super::{BlendMode, Color, ColorFilter, PaintStyle};

/// Fill style: paints shape interiors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brush {
    style: PaintStyle,
}

impl Brush {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solid brush of `color`.
    pub fn with_color(color: Color) -> Self {
        let mut brush = Self::new();
        brush.set_color(color);
        brush
    }

    #[inline]
    pub fn style(&self) -> &PaintStyle {
        &self.style
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
