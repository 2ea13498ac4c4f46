//! Text: typefaces, fonts and immutable glyph-run blobs.

mod blob;
mod font;
mod typeface;

pub use blob::{Glyph, TextBlob, TextEncoding};
pub use font::{Font, DEFAULT_TEXT_SIZE};
pub use typeface::{FontCollection, FontLoadError, FontProvider, FontStyle, Typeface};

pub(crate) use typeface::GlyphBitmap;
