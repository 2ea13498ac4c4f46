use crate::error::ValidationError;

/// Rasterization quality knobs shared by every draw call of a canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RasterConfig {
    /// Maximum distance, in device pixels, between a curve and its polyline.
    pub tolerance: f32,
    /// Vertical sub-scanlines per pixel for anti-aliased coverage.
    pub aa_samples: u8,
}

impl RasterConfig {
    pub const DEFAULT_TOLERANCE: f32 = 0.25;
    pub const DEFAULT_AA_SAMPLES: u8 = 4;
    pub const MAX_AA_SAMPLES: u8 = 16;

    pub fn new(tolerance: f32, aa_samples: u8) -> Result<Self, ValidationError> {
        let config = Self { tolerance, aa_samples };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ValidationError::InvalidTolerance(self.tolerance));
        }
        if !(1..=Self::MAX_AA_SAMPLES).contains(&self.aa_samples) {
            return Err(ValidationError::InvalidSampleCount(self.aa_samples));
        }
        Ok(())
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { tolerance: Self::DEFAULT_TOLERANCE, aa_samples: Self::DEFAULT_AA_SAMPLES }
    }
}
