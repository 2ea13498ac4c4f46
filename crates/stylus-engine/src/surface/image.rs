use std::sync::Arc;

use crate::error::SurfaceError;
use crate::paint::Rgba;

use super::{Bitmap, ImageInfo};

/// Immutable straight-alpha RGBA raster.
///
/// Cheap to clone; safe to share across threads and to draw while the bitmap
/// it was copied from is being modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Arc<[[u8; 4]]>,
}

impl Image {
    /// Copies straight-alpha RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self, SurfaceError> {
        ImageInfo::rgba_premul(width, height).validate()?;
        let expected = width as usize * height as usize * ImageInfo::BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(SurfaceError::DataLength { expected, actual: data.len() });
        }
        let pixels: &[[u8; 4]] = bytemuck::try_cast_slice(data)
            .map_err(|_| SurfaceError::DataLength { expected, actual: data.len() })?;
        Ok(Self { width, height, pixels: Arc::from(pixels) })
    }

    /// Snapshot of a bitmap's current contents.
    pub fn from_bitmap(bitmap: &Bitmap) -> Result<Self, SurfaceError> {
        let bytes = bitmap.to_rgba8()?;
        Self::from_rgba8(bitmap.width(), bitmap.height(), &bytes)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest-neighbour sample at image coordinates; `None` outside the image.
    pub(crate) fn sample(&self, x: f32, y: f32) -> Option<Rgba> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (ix, iy) = (x.floor() as u32, y.floor() as u32);
        if ix >= self.width || iy >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[iy as usize * self.width as usize + ix as usize];
        Some(Rgba::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0))
    }
}
