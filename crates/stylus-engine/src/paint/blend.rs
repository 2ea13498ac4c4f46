//! Per-pixel compositing operators.
//!
//! All functions take and return premultiplied colors. Separable and
//! non-separable modes follow the W3C compositing formulas; the Porter-Duff
//! modes use their coefficient form.

use crate::error::ValidationError;

use super::PremulColor;

/// Compositing operator combining a source color with the destination pixel.
///
/// Discriminants follow the drawing API's raw numbering.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum BlendMode {
    Clear = 0,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcATop,
    DstATop,
    Xor,
    Plus,
    Modulate,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub const ALL: [BlendMode; 29] = [
        BlendMode::Clear,
        BlendMode::Src,
        BlendMode::Dst,
        BlendMode::SrcOver,
        BlendMode::DstOver,
        BlendMode::SrcIn,
        BlendMode::DstIn,
        BlendMode::SrcOut,
        BlendMode::DstOut,
        BlendMode::SrcATop,
        BlendMode::DstATop,
        BlendMode::Xor,
        BlendMode::Plus,
        BlendMode::Modulate,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Multiply,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    /// Composites `src` over `dst`.
    pub fn blend(self, src: PremulColor, dst: PremulColor) -> PremulColor {
        let s = src;
        let d = dst;
        let out = match self {
            BlendMode::Clear => PremulColor::transparent(),
            BlendMode::Src => s,
            BlendMode::Dst => d,
            BlendMode::SrcOver => coeff(s, d, 1.0, 1.0 - s.a),
            BlendMode::DstOver => coeff(s, d, 1.0 - d.a, 1.0),
            BlendMode::SrcIn => coeff(s, d, d.a, 0.0),
            BlendMode::DstIn => coeff(s, d, 0.0, s.a),
            BlendMode::SrcOut => coeff(s, d, 1.0 - d.a, 0.0),
            BlendMode::DstOut => coeff(s, d, 0.0, 1.0 - s.a),
            BlendMode::SrcATop => channelwise(s, d, |sc, dc| sc * d.a + dc * (1.0 - s.a), d.a),
            BlendMode::DstATop => channelwise(s, d, |sc, dc| dc * s.a + sc * (1.0 - d.a), s.a),
            BlendMode::Xor => coeff(s, d, 1.0 - d.a, 1.0 - s.a),
            BlendMode::Plus => PremulColor::from_premul(
                (s.r + d.r).min(1.0),
                (s.g + d.g).min(1.0),
                (s.b + d.b).min(1.0),
                (s.a + d.a).min(1.0),
            ),
            BlendMode::Modulate => PremulColor::from_premul(s.r * d.r, s.g * d.g, s.b * d.b, s.a * d.a),
            BlendMode::Screen => separable(s, d, |cs, cd| cs + cd - cs * cd),
            BlendMode::Overlay => separable(s, d, |cs, cd| hard_light(cd, cs)),
            BlendMode::Darken => separable(s, d, f32::min),
            BlendMode::Lighten => separable(s, d, f32::max),
            BlendMode::ColorDodge => separable(s, d, color_dodge),
            BlendMode::ColorBurn => separable(s, d, color_burn),
            BlendMode::HardLight => separable(s, d, hard_light),
            BlendMode::SoftLight => separable(s, d, soft_light),
            BlendMode::Difference => separable(s, d, |cs, cd| (cs - cd).abs()),
            BlendMode::Exclusion => separable(s, d, |cs, cd| cs + cd - 2.0 * cs * cd),
            BlendMode::Multiply => separable(s, d, |cs, cd| cs * cd),
            BlendMode::Hue => non_separable(s, d, |cs, cd| set_lum(set_sat(cs, sat(cd)), lum(cd))),
            BlendMode::Saturation => non_separable(s, d, |cs, cd| set_lum(set_sat(cd, sat(cs)), lum(cd))),
            BlendMode::Color => non_separable(s, d, |cs, cd| set_lum(cs, lum(cd))),
            BlendMode::Luminosity => non_separable(s, d, |cs, cd| set_lum(cd, lum(cs))),
        };
        out.clamped()
    }
}

impl TryFrom<u32> for BlendMode {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        BlendMode::ALL
            .get(value as usize)
            .copied()
            .ok_or(ValidationError::UnknownEnumValue { kind: "blend mode", value })
    }
}

// ── Porter-Duff ───────────────────────────────────────────────────────────

#[inline]
fn coeff(s: PremulColor, d: PremulColor, fs: f32, fd: f32) -> PremulColor {
    PremulColor::from_premul(
        s.r * fs + d.r * fd,
        s.g * fs + d.g * fd,
        s.b * fs + d.b * fd,
        s.a * fs + d.a * fd,
    )
}

#[inline]
fn channelwise(s: PremulColor, d: PremulColor, f: impl Fn(f32, f32) -> f32, a: f32) -> PremulColor {
    PremulColor::from_premul(f(s.r, d.r), f(s.g, d.g), f(s.b, d.b), a)
}

// ── separable ─────────────────────────────────────────────────────────────

/// `co = sa·(1−da)·cs + da·(1−sa)·cd + sa·da·B(cs, cd)` on unpremultiplied channels.
fn separable(s: PremulColor, d: PremulColor, b: impl Fn(f32, f32) -> f32) -> PremulColor {
    let cs = s.to_straight();
    let cd = d.to_straight();
    let both = s.a * d.a;
    let mix = |sc: f32, dc: f32, ucs: f32, ucd: f32| {
        sc * (1.0 - d.a) + dc * (1.0 - s.a) + both * b(ucs, ucd)
    };
    PremulColor::from_premul(
        mix(s.r, d.r, cs.r, cd.r),
        mix(s.g, d.g, cs.g, cd.g),
        mix(s.b, d.b, cs.b, cd.b),
        s.a + d.a - both,
    )
}

fn hard_light(cs: f32, cd: f32) -> f32 {
    if cs <= 0.5 {
        cd * 2.0 * cs
    } else {
        let s2 = 2.0 * cs - 1.0;
        cd + s2 - cd * s2
    }
}

fn color_dodge(cs: f32, cd: f32) -> f32 {
    if cd <= 0.0 {
        0.0
    } else if cs >= 1.0 {
        1.0
    } else {
        (cd / (1.0 - cs)).min(1.0)
    }
}

fn color_burn(cs: f32, cd: f32) -> f32 {
    if cd >= 1.0 {
        1.0
    } else if cs <= 0.0 {
        0.0
    } else {
        1.0 - ((1.0 - cd) / cs).min(1.0)
    }
}

fn soft_light(cs: f32, cd: f32) -> f32 {
    if cs <= 0.5 {
        cd - (1.0 - 2.0 * cs) * cd * (1.0 - cd)
    } else {
        let dd = if cd <= 0.25 {
            ((16.0 * cd - 12.0) * cd + 4.0) * cd
        } else {
            cd.sqrt()
        };
        cd + (2.0 * cs - 1.0) * (dd - cd)
    }
}

// ── non-separable ─────────────────────────────────────────────────────────

type Rgb = [f32; 3];

fn non_separable(s: PremulColor, d: PremulColor, b: impl Fn(Rgb, Rgb) -> Rgb) -> PremulColor {
    let cs = s.to_straight();
    let cd = d.to_straight();
    let both = s.a * d.a;
    let mixed = b([cs.r, cs.g, cs.b], [cd.r, cd.g, cd.b]);
    PremulColor::from_premul(
        s.r * (1.0 - d.a) + d.r * (1.0 - s.a) + both * mixed[0],
        s.g * (1.0 - d.a) + d.g * (1.0 - s.a) + both * mixed[1],
        s.b * (1.0 - d.a) + d.b * (1.0 - s.a) + both * mixed[2],
        s.a + d.a - both,
    )
}

#[inline]
fn lum(c: Rgb) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: Rgb) -> Rgb {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 && l - n > f32::EPSILON {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 && x - l > f32::EPSILON {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

fn set_lum(c: Rgb, l: f32) -> Rgb {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

#[inline]
fn sat(c: Rgb) -> f32 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: Rgb, s: f32) -> Rgb {
    let max = c[0].max(c[1]).max(c[2]);
    let min = c[0].min(c[1]).min(c[2]);
    let range = max - min;
    c.map(|v| {
        if range <= f32::EPSILON {
            0.0
        } else if v == max {
            s
        } else if v == min {
            0.0
        } else {
            (v - min) * s / range
        }
    })
}
