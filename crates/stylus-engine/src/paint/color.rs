use crate::error::ValidationError;

/// 8-bit straight-alpha ARGB color, the caller-facing color value.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::from_argb(255, 0, 0, 0);
    pub const WHITE: Color = Color::from_argb(255, 255, 255, 255);
    pub const RED: Color = Color::from_argb(255, 255, 0, 0);
    pub const GREEN: Color = Color::from_argb(255, 0, 255, 0);
    pub const BLUE: Color = Color::from_argb(255, 0, 0, 255);
    pub const YELLOW: Color = Color::from_argb(255, 255, 255, 0);
    pub const CYAN: Color = Color::from_argb(255, 0, 255, 255);
    pub const MAGENTA: Color = Color::from_argb(255, 255, 0, 255);
    pub const GRAY: Color = Color::from_argb(255, 128, 128, 128);

    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Unpacks `0xAARRGGBB`.
    #[inline]
    pub const fn from_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs into `0xAARRGGBB`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Builds a color from wide integer channels, rejecting anything outside `0..=255`.
    ///
    /// Used at scripting boundaries where channel values arrive untyped.
    pub fn try_from_channels(a: i64, r: i64, g: i64, b: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            a: channel("alpha", a)?,
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    #[inline]
    pub fn to_rgba(self) -> Rgba {
        Rgba::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }
}

pub(crate) fn channel(name: &'static str, value: i64) -> Result<u8, ValidationError> {
    u8::try_from(value).map_err(|_| ValidationError::ChannelOutOfRange { channel: name, value })
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Straight-alpha RGBA with `f32` channels in `[0, 1]`.
///
/// Color filters operate in this space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn premultiply(self) -> PremulColor {
        PremulColor::from_straight(self.r, self.g, self.b, self.a)
    }

    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    #[inline]
    pub fn to_color(self) -> Color {
        Color::from_argb(quantize(self.a), quantize(self.r), quantize(self.g), quantize(self.b))
    }
}

/// Linear premultiplied RGBA.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` and never exceed it.
///
/// Blend modes and pixel stores operate in this space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PremulColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl PremulColor {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> Rgba {
        if self.a <= 0.0 {
            Rgba::default()
        } else {
            let inv = 1.0 / self.a;
            Rgba::new(self.r * inv, self.g * inv, self.b * inv, self.a).clamped()
        }
    }

    /// Clamps all channels to [0, 1] and enforces premultiplication.
    #[inline]
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);
        Self {
            r: self.r.clamp(0.0, a),
            g: self.g.clamp(0.0, a),
            b: self.b.clamp(0.0, a),
            a,
        }
    }

    #[inline]
    pub fn scale(self, k: f32) -> Self {
        Self { r: self.r * k, g: self.g * k, b: self.b * k, a: self.a * k }
    }

    /// Linear interpolation from `self` (t = 0) to `to` (t = 1).
    #[inline]
    pub fn lerp(self, to: PremulColor, t: f32) -> Self {
        Self {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    #[inline]
    pub fn to_color(self) -> Color {
        self.to_straight().to_color()
    }
}

impl From<Color> for PremulColor {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_rgba().premultiply()
    }
}
