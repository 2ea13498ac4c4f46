use crate::error::ValidationError;

use super::{BlendMode, Color, ColorFilter, PremulColor, Rgba};

/// Style state shared by [`Pen`](super::Pen) and [`Brush`](super::Brush).
///
/// Alpha is not stored separately: [`set_alpha`](Self::set_alpha) overrides the
/// alpha channel of the current color, and [`set_color`](Self::set_color)
/// replaces both.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintStyle {
    color: Color,
    anti_alias: bool,
    blend_mode: BlendMode,
    color_filter: Option<ColorFilter>,
    dither: bool,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            anti_alias: false,
            blend_mode: BlendMode::SrcOver,
            color_filter: None,
            dither: false,
        }
    }
}

impl PaintStyle {
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn alpha(&self) -> u8 {
        self.color.a
    }

    /// Overrides the alpha channel. Values above 255 are rejected.
    pub fn set_alpha(&mut self, alpha: u32) -> Result<(), ValidationError> {
        self.color.a = super::color::channel("alpha", i64::from(alpha))?;
        Ok(())
    }

    #[inline]
    pub fn is_anti_alias(&self) -> bool {
        self.anti_alias
    }

    #[inline]
    pub fn set_anti_alias(&mut self, aa: bool) {
        self.anti_alias = aa;
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    #[inline]
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    /// Sets the blend mode from its raw drawing-API number.
    pub fn set_blend_mode_raw(&mut self, raw: u32) -> Result<(), ValidationError> {
        self.blend_mode = BlendMode::try_from(raw)?;
        Ok(())
    }

    #[inline]
    pub fn color_filter(&self) -> Option<&ColorFilter> {
        self.color_filter.as_ref()
    }

    /// `None` clears the filter.
    #[inline]
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.color_filter = filter;
    }

    #[inline]
    pub fn is_dither(&self) -> bool {
        self.dither
    }

    #[inline]
    pub fn set_dither(&mut self, dither: bool) {
        self.dither = dither;
    }

    /// Source color after the color filter, premultiplied.
    pub(crate) fn resolved_color(&self) -> PremulColor {
        self.shade(self.color.to_rgba())
    }

    /// Applies the color filter, then premultiplies.
    pub(crate) fn shade(&self, c: Rgba) -> PremulColor {
        let c = match &self.color_filter {
            Some(f) => f.filter(c),
            None => c,
        };
        c.premultiply()
    }

    /// Shades a sampled texel after scaling its alpha by the paint alpha.
    pub(crate) fn modulate(&self, texel: Rgba) -> PremulColor {
        let alpha = self.color.a as f32 / 255.0;
        self.shade(Rgba::new(texel.r, texel.g, texel.b, texel.a * alpha))
    }
}
