//! Paint presets applied before each measured case.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use stylus_engine::{
    create_compose_color_filter, BlendMode, Brush, Color, ColorFilter, LineCap, LineJoin, Pen, ValidationError,
};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    /// Plain paints: black, hairline pen, no filters.
    #[default]
    None,
    /// Every option enabled at once, the slowest path through the pipeline.
    Complex,
    Type1,
    Type2,
    Type3,
    Type4,
}

fn gamma_round_trip() -> ColorFilter {
    create_compose_color_filter(&ColorFilter::linear_to_srgb_gamma(), &ColorFilter::srgb_gamma_to_linear())
}

impl StyleType {
    pub fn pen(self) -> Result<Pen, ValidationError> {
        let mut pen = Pen::new();
        match self {
            StyleType::None => {}
            StyleType::Complex => {
                pen.set_color(Color::from_argb(255, 40, 90, 200));
                pen.set_width(12.0)?;
                pen.set_cap(LineCap::Round);
                pen.set_join(LineJoin::Round);
                pen.set_anti_alias(true);
                pen.set_dither(true);
                pen.set_alpha(200)?;
                pen.set_color_filter(Some(gamma_round_trip()));
            }
            StyleType::Type1 => {
                pen.set_color(Color::GREEN);
                pen.set_width(20.0)?;
                pen.set_anti_alias(true);
                pen.set_dither(true);
                pen.set_blend_mode(BlendMode::Src);
                pen.set_color_filter(Some(ColorFilter::blend(Color::from_argb(165, 216, 231, 56), BlendMode::Src)));
            }
            StyleType::Type2 => {
                pen.set_color(Color::from_argb(233, 159, 254, 52));
                pen.set_anti_alias(true);
                pen.set_alpha(120)?;
                pen.set_width(100.0)?;
                pen.set_color_filter(Some(gamma_round_trip()));
            }
            StyleType::Type3 => {
                pen.set_color(Color::from_argb(255, 216, 34, 79));
                pen.set_color_filter(Some(ColorFilter::luma()));
            }
            StyleType::Type4 => {
                pen.set_color(Color::from_argb(255, 56, 234, 156));
                pen.set_width(10.0)?;
                pen.set_blend_mode(BlendMode::Multiply);
            }
        }
        Ok(pen)
    }

    pub fn brush(self) -> Result<Brush, ValidationError> {
        let mut brush = Brush::new();
        match self {
            StyleType::None => {}
            StyleType::Complex => {
                brush.set_color(Color::from_argb(255, 220, 120, 40));
                brush.set_anti_alias(true);
                brush.set_dither(true);
                brush.set_alpha(180)?;
                brush.set_color_filter(Some(gamma_round_trip()));
            }
            StyleType::Type1 => {
                brush.set_color(Color::RED);
                brush.set_anti_alias(true);
                brush.set_blend_mode(BlendMode::Src);
                brush.set_color_filter(Some(ColorFilter::blend(Color::from_argb(165, 198, 156, 123), BlendMode::Src)));
            }
            StyleType::Type2 => {
                brush.set_color(Color::from_argb(200, 200, 125, 98));
                brush.set_anti_alias(true);
                brush.set_alpha(160)?;
                brush.set_color_filter(Some(gamma_round_trip()));
            }
            StyleType::Type3 => {
                brush.set_color(Color::from_argb(255, 120, 216, 156));
                brush.set_color_filter(Some(ColorFilter::luma()));
            }
            StyleType::Type4 => {
                brush.set_color(Color::from_argb(255, 213, 120, 25));
                brush.set_blend_mode(BlendMode::Multiply);
            }
        }
        Ok(brush)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_builds() {
        for style in StyleType::value_variants() {
            assert!(style.pen().is_ok(), "{style:?}");
            assert!(style.brush().is_ok(), "{style:?}");
        }
    }

    #[test]
    fn alpha_override_keeps_rgb() {
        let brush = StyleType::Type2.brush().unwrap();
        assert_eq!(brush.color(), Color::from_argb(160, 200, 125, 98));
        assert_eq!(StyleType::Type4.pen().unwrap().width(), 10.0);
    }
}
