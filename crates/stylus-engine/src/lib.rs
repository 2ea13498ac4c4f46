//! Stylus engine crate.
//!
//! A retained-mode 2D vector drawing engine: paths built from lines, curves and
//! arcs; pens and brushes attached to a canvas; text blobs; blend modes and color
//! filters; all rasterized on the CPU into caller-owned bitmaps.

pub mod canvas;
pub mod config;
pub mod coords;
pub mod error;
pub mod logging;
pub mod paint;
pub mod path;
pub mod record;
pub mod surface;
pub mod text;

mod raster;

pub use canvas::{AttachMode, Canvas, PointMode};
pub use config::RasterConfig;
pub use coords::{IntRect, Matrix, Point, Rect};
pub use error::{DrawError, EncodingError, GeometryError, SurfaceError, ValidationError};
pub use paint::{create_compose_color_filter, BlendMode, Brush, Color, ColorFilter, LineCap, LineJoin, Pen};
pub use path::{FillType, Path, PathDirection};
pub use record::Recording;
pub use surface::{AlphaType, Bitmap, HeapAllocator, Image, ImageInfo, PixelAllocator, PixelFormat};
pub use text::{Font, FontCollection, FontProvider, FontStyle, TextBlob, TextEncoding, Typeface};
