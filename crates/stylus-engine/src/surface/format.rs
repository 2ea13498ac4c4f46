use crate::error::{SurfaceError, ValidationError};
use crate::paint::PremulColor;

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 1 << 15;

/// Byte order of a 32-bit pixel.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    #[default]
    Rgba8888 = 0,
    Bgra8888,
}

impl TryFrom<u32> for PixelFormat {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PixelFormat::Rgba8888),
            1 => Ok(PixelFormat::Bgra8888),
            _ => Err(ValidationError::UnknownEnumValue { kind: "pixel format", value }),
        }
    }
}

/// How stored color channels relate to alpha.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum AlphaType {
    /// Alpha is ignored and read back as fully opaque.
    Opaque = 0,
    #[default]
    Premul,
    Unpremul,
}

impl TryFrom<u32> for AlphaType {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AlphaType::Opaque),
            1 => Ok(AlphaType::Premul),
            2 => Ok(AlphaType::Unpremul),
            _ => Err(ValidationError::UnknownEnumValue { kind: "alpha type", value }),
        }
    }
}

/// Dimensions and pixel layout of a buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub alpha_type: AlphaType,
}

impl ImageInfo {
    pub const BYTES_PER_PIXEL: usize = 4;

    #[inline]
    pub const fn new(width: u32, height: u32, format: PixelFormat, alpha_type: AlphaType) -> Self {
        Self { width, height, format, alpha_type }
    }

    /// Premultiplied RGBA, the layout used by most callers.
    #[inline]
    pub const fn rgba_premul(width: u32, height: u32) -> Self {
        Self::new(width, height, PixelFormat::Rgba8888, AlphaType::Premul)
    }

    pub fn validate(&self) -> Result<(), SurfaceError> {
        let ok = (1..=MAX_DIMENSION).contains(&self.width) && (1..=MAX_DIMENSION).contains(&self.height);
        if ok {
            Ok(())
        } else {
            Err(SurfaceError::InvalidDimensions { width: self.width, height: self.height })
        }
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * Self::BYTES_PER_PIXEL
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.pixel_count() * Self::BYTES_PER_PIXEL
    }

    /// Converts one stored pixel to premultiplied color.
    pub(crate) fn unpack(&self, px: [u8; 4]) -> PremulColor {
        let [r, g, b, a] = match self.format {
            PixelFormat::Rgba8888 => px,
            PixelFormat::Bgra8888 => [px[2], px[1], px[0], px[3]],
        };
        let f = |v: u8| v as f32 / 255.0;
        match self.alpha_type {
            AlphaType::Opaque => PremulColor::from_premul(f(r), f(g), f(b), 1.0),
            AlphaType::Premul => PremulColor::from_premul(f(r), f(g), f(b), f(a)).clamped(),
            AlphaType::Unpremul => PremulColor::from_straight(f(r), f(g), f(b), f(a)),
        }
    }

    /// Quantizes a premultiplied color into the stored layout.
    ///
    /// `bias` is added to every color channel before rounding (ordered dither).
    pub(crate) fn pack(&self, c: PremulColor, bias: f32) -> [u8; 4] {
        let q = |v: f32| ((v + bias).clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        let c = c.clamped();
        let (r, g, b, a) = match self.alpha_type {
            AlphaType::Opaque => (c.r, c.g, c.b, 1.0),
            AlphaType::Premul => (c.r, c.g, c.b, c.a),
            AlphaType::Unpremul => {
                let s = c.to_straight();
                (s.r, s.g, s.b, s.a)
            }
        };
        let a8 = (a.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        let (r8, g8, b8) = (q(r), q(g), q(b));
        // premultiplied channels never exceed alpha
        let (r8, g8, b8) = if self.alpha_type == AlphaType::Premul {
            (r8.min(a8), g8.min(a8), b8.min(a8))
        } else {
            (r8, g8, b8)
        };
        match self.format {
            PixelFormat::Rgba8888 => [r8, g8, b8, a8],
            PixelFormat::Bgra8888 => [b8, g8, r8, a8],
        }
    }
}
