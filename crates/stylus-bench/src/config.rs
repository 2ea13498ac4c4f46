//! Bench configuration.
//!
//! Values come from an optional TOML file; command-line flags override them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use stylus_engine::RasterConfig;

use crate::styles::StyleType;

/// Encoded format of captured surfaces.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// `[raster]` table.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSection {
    pub tolerance: f32,
    pub aa_samples: u8,
}

impl Default for RasterSection {
    fn default() -> Self {
        let d = RasterConfig::default();
        Self { tolerance: d.tolerance, aa_samples: d.aa_samples }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub width: u32,
    pub height: u32,
    /// Calls of the measured primitive per case.
    pub iterations: u32,
    /// Background painted before each case, 0xAARRGGBB.
    pub background: u32,
    /// Directory for captured images; nothing is written when unset.
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub jpeg_quality: u8,
    /// Substring filter on case names.
    pub case_filter: Option<String>,
    pub style: StyleType,
    /// `env_logger` filter string.
    pub log: Option<String>,
    pub raster: RasterSection,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 720,
            iterations: 1,
            background: 0xFFFF_FFFF,
            output_dir: None,
            format: OutputFormat::Png,
            jpeg_quality: 90,
            case_filter: None,
            style: StyleType::None,
            log: None,
            raster: RasterSection::default(),
        }
    }
}

impl BenchConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing bench config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Engine raster settings, validated.
    pub fn raster_config(&self) -> Result<RasterConfig> {
        RasterConfig::new(self.raster.tolerance, self.raster.aa_samples).context("invalid [raster] section")
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.width > 0 && self.height > 0, "surface size must be non-zero");
        anyhow::ensure!((1..=100).contains(&self.jpeg_quality), "jpeg_quality must be within 1..=100");
        self.raster_config()?;
        Ok(())
    }

    pub fn matches(&self, case: &str) -> bool {
        self.case_filter.as_deref().is_none_or(|f| case.contains(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let c = BenchConfig::from_toml("").unwrap();
        assert_eq!(c.width, 720);
        assert_eq!(c.iterations, 1);
        assert_eq!(c.format, OutputFormat::Png);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_tables_fill_defaults() {
        let c = BenchConfig::from_toml(
            r#"
            width = 320
            format = "jpeg"
            style = "type2"

            [raster]
            aa_samples = 8
            "#,
        )
        .unwrap();
        assert_eq!((c.width, c.height), (320, 720));
        assert_eq!(c.format, OutputFormat::Jpeg);
        assert_eq!(c.style, StyleType::Type2);
        assert_eq!(c.raster.aa_samples, 8);
        assert_eq!(c.raster.tolerance, RasterConfig::DEFAULT_TOLERANCE);
    }

    #[test]
    fn invalid_values_fail_validation() {
        let mut c = BenchConfig::default();
        c.raster.aa_samples = 0;
        assert!(c.validate().is_err());

        let c = BenchConfig { jpeg_quality: 0, ..BenchConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn case_filter_is_substring() {
        let c = BenchConfig { case_filter: Some("rect".into()), ..BenchConfig::default() };
        assert!(c.matches("draw_rect"));
        assert!(c.matches("draw_round_rect"));
        assert!(!c.matches("draw_circle"));
        assert!(BenchConfig::default().matches("anything"));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(BenchConfig::from_toml(r#"format = "gif""#).is_err());
    }
}
