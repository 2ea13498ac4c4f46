use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Error returned when font bytes cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// Weight and slant requested from a [`FontProvider`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontStyle {
    pub weight: u16,
    pub italic: bool,
}

impl FontStyle {
    pub const NORMAL: FontStyle = FontStyle { weight: 400, italic: false };
    pub const BOLD: FontStyle = FontStyle { weight: 700, italic: false };
    pub const ITALIC: FontStyle = FontStyle { weight: 400, italic: true };
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Rasterized glyph coverage, positioned relative to the pen point on the baseline.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GlyphBitmap {
    pub left: i32,
    /// Offset of the top row from the baseline (negative is above).
    pub top: i32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

/// A face glyphs are drawn from.
///
/// `Builtin` is always available: it renders every non-blank glyph as a hollow
/// box, so text remains visible without any font data.
#[derive(Clone, Default)]
pub enum Typeface {
    #[default]
    Builtin,
    Outline(Arc<fontdue::Font>),
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typeface::Builtin => f.write_str("Typeface::Builtin"),
            Typeface::Outline(font) => write!(f, "Typeface::Outline({:p})", Arc::as_ptr(font)),
        }
    }
}

impl PartialEq for Typeface {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Typeface::Builtin, Typeface::Builtin) => true,
            (Typeface::Outline(a), Typeface::Outline(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

const BUILTIN_ADVANCE: f32 = 0.6;
const BUILTIN_ASCENT: f32 = 0.8;
const BUILTIN_DESCENT: f32 = 0.2;

impl Typeface {
    /// Parses a TrueType or OpenType font.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Typeface::Outline(Arc::new(font)))
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    /// Glyph id for `ch`; `0` when the face has no glyph (or the char is blank).
    pub fn glyph_id(&self, ch: char) -> u16 {
        match self {
            Typeface::Builtin if ch.is_whitespace() || ch.is_control() => 0,
            Typeface::Builtin => 1,
            Typeface::Outline(font) => font.lookup_glyph_index(ch),
        }
    }

    /// Horizontal advance of `glyph` at `size`.
    pub fn advance(&self, glyph: u16, size: f32) -> f32 {
        match self {
            Typeface::Builtin => size * BUILTIN_ADVANCE,
            Typeface::Outline(font) => font.metrics_indexed(glyph, size).advance_width,
        }
    }

    /// `(ascent, descent)` as positive distances from the baseline.
    pub fn vertical_metrics(&self, size: f32) -> (f32, f32) {
        let builtin = (size * BUILTIN_ASCENT, size * BUILTIN_DESCENT);
        match self {
            Typeface::Builtin => builtin,
            Typeface::Outline(font) => font
                .horizontal_line_metrics(size)
                .map(|m| (m.ascent, -m.descent))
                .unwrap_or(builtin),
        }
    }

    pub(crate) fn rasterize(&self, glyph: u16, size: f32) -> GlyphBitmap {
        match self {
            Typeface::Builtin => builtin_glyph(glyph, size),
            Typeface::Outline(font) => {
                let (m, coverage) = font.rasterize_indexed(glyph, size);
                GlyphBitmap {
                    left: m.xmin,
                    top: -(m.ymin + m.height as i32),
                    width: m.width,
                    height: m.height,
                    coverage,
                }
            }
        }
    }
}

fn builtin_glyph(glyph: u16, size: f32) -> GlyphBitmap {
    let w = (size * 0.4).round().max(1.0) as usize;
    let h = (size * 0.7).round().max(1.0) as usize;
    if glyph == 0 || size <= 0.0 {
        return GlyphBitmap { left: 0, top: 0, width: 0, height: 0, coverage: Vec::new() };
    }
    let t = (size / 12.0).round().max(1.0) as usize;
    let mut coverage = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            if x < t || y < t || x + t >= w || y + t >= h {
                coverage[y * w + x] = 255;
            }
        }
    }
    GlyphBitmap {
        left: (size * 0.1).round() as i32,
        top: -(h as i32),
        width: w,
        height: h,
        coverage,
    }
}

/// Resolves typefaces by family name and style.
pub trait FontProvider {
    fn match_family(&self, family: &str, style: FontStyle) -> Option<Typeface>;

    /// Face used when no family matches.
    fn default_typeface(&self) -> Typeface {
        Typeface::Builtin
    }

    fn resolve(&self, family: &str, style: FontStyle) -> Typeface {
        self.match_family(family, style).unwrap_or_else(|| {
            log::debug!("no typeface for family {family:?} {style:?}, using default");
            self.default_typeface()
        })
    }
}

/// In-memory [`FontProvider`] holding parsed faces.
#[derive(Debug, Default)]
pub struct FontCollection {
    faces: Vec<(String, FontStyle, Typeface)>,
}

impl FontCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `bytes` and registers the face under `family`/`style`.
    pub fn load_font(&mut self, family: &str, style: FontStyle, bytes: &[u8]) -> Result<Typeface, FontLoadError> {
        let face = Typeface::from_bytes(bytes)?;
        self.register(family, style, face.clone());
        Ok(face)
    }

    /// Registers an existing face. A later registration for the same key wins.
    pub fn register(&mut self, family: &str, style: FontStyle, face: Typeface) {
        self.faces.retain(|(f, s, _)| !(f.eq_ignore_ascii_case(family) && *s == style));
        self.faces.push((family.to_owned(), style, face));
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl FontProvider for FontCollection {
    /// Exact style match first, then any face of the family.
    fn match_family(&self, family: &str, style: FontStyle) -> Option<Typeface> {
        let family_faces = || self.faces.iter().filter(|(f, _, _)| f.eq_ignore_ascii_case(family));
        family_faces()
            .find(|(_, s, _)| *s == style)
            .or_else(|| family_faces().next())
            .map(|(_, _, face)| face.clone())
    }
}
