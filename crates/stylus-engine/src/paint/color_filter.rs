//! Color filters: pure color transforms applied to the source before compositing.

use std::sync::Arc;

use super::{BlendMode, Color, Rgba};

/// Shared, immutable color transform.
///
/// Cloning is cheap; filters can be attached to any number of pens and brushes
/// and read from any thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorFilter(Arc<FilterKind>);

#[derive(Debug, Clone, PartialEq)]
enum FilterKind {
    /// `mode(src = color, dst = input)`.
    Blend { color: Color, mode: BlendMode },
    /// Row-major 4x5 matrix over straight RGBA, offsets in `[0, 1]` units.
    Matrix([f32; 20]),
    LinearToSrgbGamma,
    SrgbGammaToLinear,
    /// Alpha becomes the Rec.709 luma of the premultiplied input, RGB is cleared.
    Luma,
    /// `outer(inner(input))`.
    Compose { outer: ColorFilter, inner: ColorFilter },
}

impl ColorFilter {
    fn new(kind: FilterKind) -> Self {
        Self(Arc::new(kind))
    }

    /// Blends the constant `color` (as source) onto every input color (as destination).
    pub fn blend(color: Color, mode: BlendMode) -> Self {
        Self::new(FilterKind::Blend { color, mode })
    }

    pub fn matrix(m: [f32; 20]) -> Self {
        Self::new(FilterKind::Matrix(m))
    }

    pub fn linear_to_srgb_gamma() -> Self {
        Self::new(FilterKind::LinearToSrgbGamma)
    }

    pub fn srgb_gamma_to_linear() -> Self {
        Self::new(FilterKind::SrgbGammaToLinear)
    }

    pub fn luma() -> Self {
        Self::new(FilterKind::Luma)
    }

    /// Applies `inner` first and feeds its result into `outer`.
    pub fn compose(outer: ColorFilter, inner: ColorFilter) -> Self {
        Self::new(FilterKind::Compose { outer, inner })
    }

    /// Transforms one straight-alpha color.
    pub fn filter(&self, c: Rgba) -> Rgba {
        match &*self.0 {
            FilterKind::Blend { color, mode } => {
                mode.blend(color.to_rgba().premultiply(), c.premultiply()).to_straight()
            }
            FilterKind::Matrix(m) => {
                let row = |i: usize| m[i] * c.r + m[i + 1] * c.g + m[i + 2] * c.b + m[i + 3] * c.a + m[i + 4];
                Rgba::new(row(0), row(5), row(10), row(15)).clamped()
            }
            FilterKind::LinearToSrgbGamma => Rgba::new(
                linear_to_srgb(c.r),
                linear_to_srgb(c.g),
                linear_to_srgb(c.b),
                c.a,
            ),
            FilterKind::SrgbGammaToLinear => Rgba::new(
                srgb_to_linear(c.r),
                srgb_to_linear(c.g),
                srgb_to_linear(c.b),
                c.a,
            ),
            FilterKind::Luma => {
                let p = c.premultiply();
                let luma = 0.2126 * p.r + 0.7152 * p.g + 0.0722 * p.b;
                Rgba::new(0.0, 0.0, 0.0, luma.clamp(0.0, 1.0))
            }
            FilterKind::Compose { outer, inner } => outer.filter(inner.filter(c)),
        }
    }

    /// Convenience wrapper over [`filter`](Self::filter) for 8-bit colors.
    pub fn filter_color(&self, c: Color) -> Color {
        self.filter(c.to_rgba()).to_color()
    }
}

/// Builds `outer ∘ inner`.
#[inline]
pub fn create_compose_color_filter(outer: &ColorFilter, inner: &ColorFilter) -> ColorFilter {
    ColorFilter::compose(outer.clone(), inner.clone())
}

fn linear_to_srgb(v: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

fn srgb_to_linear(v: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: [f32; 20] = [
        1.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    fn approx(a: Rgba, b: Rgba) -> bool {
        (a.r - b.r).abs() < 1e-4 && (a.g - b.g).abs() < 1e-4 && (a.b - b.b).abs() < 1e-4 && (a.a - b.a).abs() < 1e-4
    }

    #[test]
    fn compose_applies_inner_then_outer() {
        // inner drops red, outer replaces any color with its luma in alpha.
        let mut drop_red = IDENTITY;
        drop_red[0] = 0.0;
        let inner = ColorFilter::matrix(drop_red);
        let outer = ColorFilter::luma();
        let composed = create_compose_color_filter(&outer, &inner);

        let x = Rgba::new(1.0, 0.5, 0.25, 1.0);
        assert!(approx(composed.filter(x), outer.filter(inner.filter(x))));
        // The reverse order gives a different answer, so order matters.
        assert!(!approx(composed.filter(x), inner.filter(outer.filter(x))));
    }

    #[test]
    fn identity_matrix_is_a_no_op() {
        let x = Rgba::new(0.2, 0.4, 0.6, 0.8);
        assert!(approx(ColorFilter::matrix(IDENTITY).filter(x), x));
    }

    #[test]
    fn blend_src_replaces_input() {
        let f = ColorFilter::blend(Color::RED, BlendMode::Src);
        assert_eq!(f.filter_color(Color::BLUE), Color::RED);
    }

    #[test]
    fn blend_dst_keeps_input() {
        let f = ColorFilter::blend(Color::RED, BlendMode::Dst);
        assert_eq!(f.filter_color(Color::BLUE), Color::BLUE);
    }

    #[test]
    fn gamma_conversions_are_inverse() {
        let x = Rgba::new(0.1, 0.5, 0.9, 1.0);
        let there = ColorFilter::srgb_gamma_to_linear().filter(x);
        let back = ColorFilter::linear_to_srgb_gamma().filter(there);
        assert!(approx(back, x));
    }

    #[test]
    fn luma_of_white_is_opaque_black_with_full_alpha() {
        let out = ColorFilter::luma().filter(Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert!(approx(out, Rgba::new(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn filtering_is_deterministic() {
        let f = ColorFilter::compose(ColorFilter::luma(), ColorFilter::linear_to_srgb_gamma());
        let x = Rgba::new(0.3, 0.7, 0.1, 0.9);
        assert_eq!(f.filter(x), f.filter(x));
    }
}
