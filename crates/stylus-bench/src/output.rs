//! Captured surface encoding.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use stylus_engine::Bitmap;

use crate::config::OutputFormat;

/// Converts a bitmap into a straight-alpha RGBA8 image.
pub fn to_image(bitmap: &Bitmap) -> Result<RgbaImage> {
    let pixels = bitmap.to_rgba8().context("reading surface pixels")?;
    RgbaImage::from_raw(bitmap.width(), bitmap.height(), pixels).context("surface size does not match pixel data")
}

/// Writes `bitmap` as `<dir>/<stem>.<ext>` and returns the written path.
pub fn save(bitmap: &Bitmap, dir: &Path, stem: &str, format: OutputFormat, jpeg_quality: u8) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("{stem}.{}", format.extension()));
    let img = to_image(bitmap)?;

    match format {
        OutputFormat::Png => {
            img.save_with_format(&path, ImageFormat::Png)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        OutputFormat::Jpeg => {
            // jpeg has no alpha channel
            let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
            let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality);
            encoder.encode_image(&rgb).with_context(|| format!("encoding {}", path.display()))?;
        }
    }

    log::debug!("wrote {}", path.display());
    Ok(path)
}
