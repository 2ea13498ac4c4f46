use crate::error::ValidationError;

use super::{FontProvider, FontStyle, Typeface};

pub const DEFAULT_TEXT_SIZE: f32 = 12.0;

/// A typeface at a given pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    typeface: Typeface,
    size: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self { typeface: Typeface::Builtin, size: DEFAULT_TEXT_SIZE }
    }
}

impl Font {
    pub fn new(typeface: Typeface, size: f32) -> Result<Self, ValidationError> {
        let mut font = Self { typeface, size: DEFAULT_TEXT_SIZE };
        font.set_size(size)?;
        Ok(font)
    }

    /// Resolves `family` through `provider`, falling back to its default face.
    pub fn from_provider(
        provider: &dyn FontProvider,
        family: &str,
        style: FontStyle,
        size: f32,
    ) -> Result<Self, ValidationError> {
        Self::new(provider.resolve(family, style), size)
    }

    #[inline]
    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    #[inline]
    pub fn set_typeface(&mut self, typeface: Typeface) {
        self.typeface = typeface;
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) -> Result<(), ValidationError> {
        if !size.is_finite() || size < 0.0 {
            return Err(ValidationError::InvalidTextSize(size));
        }
        self.size = size;
        Ok(())
    }

    /// Sum of advances of `text` laid out on one line.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|ch| self.typeface.advance(self.typeface.glyph_id(ch), self.size))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FontCollection;

    #[test]
    fn negative_size_is_rejected() {
        let mut font = Font::default();
        assert_eq!(font.set_size(-1.0), Err(ValidationError::InvalidTextSize(-1.0)));
        assert!(Font::new(Typeface::Builtin, f32::INFINITY).is_err());
        assert_eq!(font.size(), DEFAULT_TEXT_SIZE);
    }

    #[test]
    fn builtin_measure_is_linear_in_length() {
        let font = Font::new(Typeface::Builtin, 10.0).unwrap();
        assert!((font.measure("abcd") - 24.0).abs() < 1e-4);
        assert_eq!(font.measure(""), 0.0);
    }

    #[test]
    fn provider_fallback_yields_builtin() {
        let fonts = FontCollection::new();
        let font = Font::from_provider(&fonts, "Missing", FontStyle::NORMAL, 14.0).unwrap();
        assert!(font.typeface().is_builtin());
    }
}
