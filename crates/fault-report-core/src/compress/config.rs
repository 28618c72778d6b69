//! Compression settings.
//!
//! Every call site that needs a photo under some byte budget describes its
//! needs with one [`CompressionConfig`] record. Field names serialize in
//! camelCase so the form can pass a partial object and inherit the rest.

use serde::{Deserialize, Serialize};

use super::CompressError;
use crate::decode::FilterType;

/// One KiB.
pub const KIB: usize = 1024;

/// Highest `max_attempts` a config may ask for.
pub const MAX_ATTEMPTS_LIMIT: u32 = 100;

/// Parameters for the size-bounded re-encode search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompressionConfig {
    /// Longer edge of the first attempt, in pixels. Smaller sources are not upscaled.
    pub start_max_dimension: u32,
    /// JPEG quality of the first attempt (0, 1].
    pub start_quality: f32,
    /// Factor applied to the working scale after each miss (0, 1].
    pub shrink_ratio: f32,
    /// Quality subtracted after each miss.
    pub quality_step: f32,
    /// Lowest quality the search will use.
    pub quality_floor: f32,
    /// Maximum number of render+encode attempts.
    pub max_attempts: u32,
    /// Byte budget for the encoded JPEG.
    pub target_bytes: usize,
    /// Resampling filter used when shrinking.
    pub filter: FilterType,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::email_attachment()
    }
}

impl CompressionConfig {
    /// Photo embedded directly in the notification email.
    ///
    /// The email provider rejects template payloads much over 50 KB, and the
    /// photo travels base64-encoded next to the text fields.
    pub fn email_attachment() -> Self {
        Self {
            start_max_dimension: 800,
            start_quality: 0.9,
            shrink_ratio: 0.75,
            quality_step: 0.1,
            quality_floor: 0.5,
            max_attempts: 10,
            target_bytes: 48 * KIB,
            filter: FilterType::Bilinear,
        }
    }

    /// Tight budget used when several photos share one email.
    pub fn compact() -> Self {
        Self {
            start_max_dimension: 600,
            start_quality: 0.7,
            shrink_ratio: 0.8,
            quality_step: 0.1,
            quality_floor: 0.1,
            max_attempts: 15,
            target_bytes: 10 * KIB,
            filter: FilterType::Bilinear,
        }
    }

    /// Same settings with a different byte budget.
    pub fn with_target_bytes(mut self, target_bytes: usize) -> Self {
        self.target_bytes = target_bytes;
        self
    }

    /// Check that the settings describe a terminating, well-formed search.
    pub fn validate(&self) -> Result<(), CompressError> {
        fn invalid(msg: String) -> Result<(), CompressError> {
            Err(CompressError::InvalidConfig(msg))
        }

        if self.start_max_dimension == 0 {
            return invalid("startMaxDimension must be at least 1".to_string());
        }
        if !(self.start_quality.is_finite() && self.start_quality > 0.0 && self.start_quality <= 1.0)
        {
            return invalid(format!(
                "startQuality must be in (0, 1], got {}",
                self.start_quality
            ));
        }
        if !(self.shrink_ratio.is_finite() && self.shrink_ratio > 0.0 && self.shrink_ratio <= 1.0) {
            return invalid(format!(
                "shrinkRatio must be in (0, 1], got {}",
                self.shrink_ratio
            ));
        }
        if !(self.quality_step.is_finite() && self.quality_step >= 0.0) {
            return invalid(format!(
                "qualityStep must be non-negative, got {}",
                self.quality_step
            ));
        }
        if !(self.quality_floor.is_finite()
            && self.quality_floor > 0.0
            && self.quality_floor <= self.start_quality)
        {
            return invalid(format!(
                "qualityFloor must be in (0, startQuality], got {}",
                self.quality_floor
            ));
        }
        if self.max_attempts == 0 || self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return invalid(format!(
                "maxAttempts must be in 1..={}, got {}",
                MAX_ATTEMPTS_LIMIT, self.max_attempts
            ));
        }
        Ok(())
    }
}
