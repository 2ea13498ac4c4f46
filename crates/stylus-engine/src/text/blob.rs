//! Text blobs: decoded, positioned glyph runs.
//!
//! Layout is a single line advancing along +x from the origin; no shaping,
//! kerning or line breaking is performed.

use std::sync::Arc;

use crate::coords::Rect;
use crate::error::EncodingError;

use super::{Font, Typeface};

/// How the bytes passed to [`TextBlob::make_from_string`] are interpreted.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Little-endian 16-bit code units.
    Utf16,
    /// Little-endian 32-bit code points.
    Utf32,
    /// Little-endian 16-bit glyph ids, used as-is.
    GlyphId,
}

/// One positioned glyph, relative to the blob origin on the baseline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    pub id: u16,
    pub x: f32,
    pub y: f32,
}

/// Immutable glyph run ready for drawing.
///
/// Cloning shares the glyph storage; a blob can be drawn from several threads
/// at once.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlob {
    typeface: Typeface,
    size: f32,
    glyphs: Arc<[Glyph]>,
    bounds: Rect,
}

impl TextBlob {
    /// Decodes `text` under `encoding` and lays the glyphs out with `font`.
    pub fn make_from_string(
        text: impl AsRef<[u8]>,
        font: &Font,
        encoding: TextEncoding,
    ) -> Result<TextBlob, EncodingError> {
        let bytes = text.as_ref();
        let face = font.typeface();
        let ids: Vec<u16> = match encoding {
            TextEncoding::GlyphId => decode_glyph_ids(bytes)?,
            _ => decode_chars(bytes, encoding)?.into_iter().map(|ch| face.glyph_id(ch)).collect(),
        };

        let size = font.size();
        let mut pen_x = 0.0;
        let glyphs: Vec<Glyph> = ids
            .into_iter()
            .map(|id| {
                let g = Glyph { id, x: pen_x, y: 0.0 };
                pen_x += face.advance(id, size);
                g
            })
            .collect();

        let (ascent, descent) = face.vertical_metrics(size);
        let bounds = Rect::new(0.0, -ascent, pen_x, descent);
        log::trace!("text blob: {} glyphs, advance {pen_x}", glyphs.len());
        Ok(TextBlob { typeface: face.clone(), size, glyphs: glyphs.into(), bounds })
    }

    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    #[inline]
    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Conservative bounds relative to the origin: full advance by ascent + descent.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

fn check_units(bytes: &[u8], encoding: &'static str, unit: usize) -> Result<(), EncodingError> {
    if bytes.len() % unit != 0 {
        return Err(EncodingError::Truncated { encoding, len: bytes.len(), unit });
    }
    Ok(())
}

fn decode_chars(bytes: &[u8], encoding: TextEncoding) -> Result<Vec<char>, EncodingError> {
    match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(|s| s.chars().collect())
            .map_err(|e| EncodingError::InvalidUtf8 { offset: e.valid_up_to() }),
        TextEncoding::Utf16 => {
            check_units(bytes, "UTF-16", 2)?;
            let units = bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]]));
            let mut out = Vec::with_capacity(bytes.len() / 2);
            let mut unit_index = 0usize;
            for r in char::decode_utf16(units) {
                match r {
                    Ok(ch) => {
                        unit_index += ch.len_utf16();
                        out.push(ch);
                    }
                    Err(_) => return Err(EncodingError::UnpairedSurrogate { offset: unit_index * 2 }),
                }
            }
            Ok(out)
        }
        TextEncoding::Utf32 => {
            check_units(bytes, "UTF-32", 4)?;
            bytes
                .chunks_exact(4)
                .enumerate()
                .map(|(i, c)| {
                    let value = u32::from_le_bytes([c[0], c[1], c[2], c[3]]);
                    char::from_u32(value).ok_or(EncodingError::InvalidCodePoint { value, offset: i * 4 })
                })
                .collect()
        }
        TextEncoding::GlyphId => Ok(Vec::new()),
    }
}

fn decode_glyph_ids(bytes: &[u8]) -> Result<Vec<u16>, EncodingError> {
    check_units(bytes, "glyph id", 2)?;
    Ok(bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> Font {
        Font::new(Typeface::Builtin, 10.0).unwrap()
    }

    fn utf16(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    // ── decoding ──────────────────────────────────────────────────────────

    #[test]
    fn all_encodings_agree_on_glyph_count() {
        let f = font();
        let s = "héllo 🌍";
        let a = TextBlob::make_from_string(s, &f, TextEncoding::Utf8).unwrap();
        let b = TextBlob::make_from_string(utf16(s), &f, TextEncoding::Utf16).unwrap();
        let utf32: Vec<u8> = s.chars().flat_map(|c| (c as u32).to_le_bytes()).collect();
        let c = TextBlob::make_from_string(utf32, &f, TextEncoding::Utf32).unwrap();
        assert_eq!(a.glyphs().len(), 7);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let err = TextBlob::make_from_string([b'a', b'b', 0xFF], &font(), TextEncoding::Utf8).unwrap_err();
        assert_eq!(err, EncodingError::InvalidUtf8 { offset: 2 });
    }

    #[test]
    fn lone_surrogate_is_rejected() {
        let bytes = [0x41, 0x00, 0x00, 0xD8];
        let err = TextBlob::make_from_string(bytes, &font(), TextEncoding::Utf16).unwrap_err();
        assert_eq!(err, EncodingError::UnpairedSurrogate { offset: 2 });
    }

    #[test]
    fn odd_utf16_length_is_truncated() {
        let err = TextBlob::make_from_string([0x41, 0x00, 0x42], &font(), TextEncoding::Utf16).unwrap_err();
        assert!(matches!(err, EncodingError::Truncated { unit: 2, len: 3, .. }));
    }

    #[test]
    fn out_of_range_code_point_is_rejected() {
        let bytes = 0x11_0000u32.to_le_bytes();
        let err = TextBlob::make_from_string(bytes, &font(), TextEncoding::Utf32).unwrap_err();
        assert_eq!(err, EncodingError::InvalidCodePoint { value: 0x11_0000, offset: 0 });
    }

    #[test]
    fn glyph_ids_pass_through() {
        let blob = TextBlob::make_from_string([7, 0, 1, 1], &font(), TextEncoding::GlyphId).unwrap();
        assert_eq!(blob.glyphs().iter().map(|g| g.id).collect::<Vec<_>>(), vec![7, 257]);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn glyphs_advance_along_baseline() {
        let blob = TextBlob::make_from_string("ab c", &font(), TextEncoding::Utf8).unwrap();
        for (g, want) in blob.glyphs().iter().zip([0.0, 6.0, 12.0, 18.0]) {
            assert!((g.x - want).abs() < 1e-4);
        }
        assert_eq!(blob.glyphs()[2].id, 0);
        let b = blob.bounds();
        assert!((b.right - 24.0).abs() < 1e-4 && (b.top + 8.0).abs() < 1e-4 && (b.bottom - 2.0).abs() < 1e-4);
    }

    #[test]
    fn empty_text_gives_empty_blob() {
        let blob = TextBlob::make_from_string("", &font(), TextEncoding::Utf8).unwrap();
        assert!(blob.is_empty());
    }

    #[test]
    fn blob_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TextBlob>();
    }
}
