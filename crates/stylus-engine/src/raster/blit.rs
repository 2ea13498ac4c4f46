//! Compositing of coverage masks into pixel buffers.
//!
//! `result = lerp(dst, blend(src, dst), coverage)`

use crate::coords::Matrix;
use crate::paint::{BlendMode, PaintStyle, PremulColor};
use crate::surface::{Image, Pixmap};

use super::Mask;

/// 4x4 ordered dither matrix.
const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Color source for one composite pass.
pub(crate) enum Source<'a> {
    Solid(PremulColor),
    /// `inverse` maps device pixel centers to image texels; samples are shaded by `style`.
    Image { image: &'a Image, inverse: Matrix, style: &'a PaintStyle },
}

impl Source<'_> {
    #[inline]
    fn color_at(&self, x: i32, y: i32) -> Option<PremulColor> {
        match self {
            Source::Solid(c) => Some(*c),
            Source::Image { image, inverse, style } => {
                let p = inverse.map_point((x as f32 + 0.5, y as f32 + 0.5).into());
                image.sample(p.x, p.y).map(|texel| style.modulate(texel))
            }
        }
    }
}

#[inline]
fn dither_bias(x: i32, y: i32) -> f32 {
    let v = BAYER_4X4[(y & 3) as usize][(x & 3) as usize] as f32;
    ((v + 0.5) / 16.0 - 0.5) / 255.0
}

/// Composites `src` through `mask` with `mode`.
pub(crate) fn blit_mask(dst: &mut Pixmap, mask: &Mask, src: &Source<'_>, mode: BlendMode, dither: bool) {
    let Some(area) = mask.bounds().intersect(dst.bounds()) else {
        return;
    };
    if area != mask.bounds() {
        log::trace!("mask {:?} clipped to {:?}", mask.bounds(), area);
    }
    mask.for_each(|x, y, coverage| {
        if x < area.left || x >= area.right || y < area.top || y >= area.bottom {
            return;
        }
        let Some(s) = src.color_at(x, y) else {
            return;
        };
        let (ux, uy) = (x as u32, y as u32);
        let d = dst.load(ux, uy);
        let out = d.lerp(mode.blend(s, d), coverage);
        let bias = if dither { dither_bias(x, y) } else { 0.0 };
        dst.store(ux, uy, out, bias);
    });
}
