//! Pixel buffers: layouts, bitmaps canvases draw into, and immutable images.

mod bitmap;
mod format;
mod image;

pub use bitmap::{Bitmap, HeapAllocator, PixelAllocator};
pub use format::{AlphaType, ImageInfo, PixelFormat, MAX_DIMENSION};
pub use image::Image;

pub(crate) use bitmap::Pixmap;
