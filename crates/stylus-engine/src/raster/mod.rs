//! CPU rasterization: polygon scan conversion and mask compositing.

mod blit;
mod mask;
mod scan;

pub(crate) use blit::{blit_mask, Source};
pub(crate) use mask::Mask;
pub(crate) use scan::fill_polygons;
