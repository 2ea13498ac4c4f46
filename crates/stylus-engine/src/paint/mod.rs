//! Paint model: colors, pens, brushes, blend modes and color filters.
//!
//! Scope:
//! - color representation (8-bit ARGB for callers, premultiplied f32 for compositing)
//! - stroke (`Pen`) and fill (`Brush`) style descriptors
//! - the per-pixel blend pipeline
//!
//! Geometry types remain in `coords` and `path`.

pub mod blend;
pub mod color;
pub mod color_filter;

mod brush;
mod pen;
mod style;

pub use blend::BlendMode;
pub use brush::Brush;
pub use color::{Color, PremulColor, Rgba};
pub use color_filter::{create_compose_color_filter, ColorFilter};
pub use pen::{LineCap, LineJoin, Pen, DEFAULT_MITER_LIMIT};
pub use style::PaintStyle;
