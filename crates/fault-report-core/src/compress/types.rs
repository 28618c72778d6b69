//! Result and error types for the re-encode search.

use serde::Serialize;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::render::RenderError;

/// Errors returned by the compression entry points.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The input bytes are not a decodable image.
    #[error("Could not decode photo: {0}")]
    Decode(#[from] DecodeError),

    /// No drawable surface could be produced or encoded.
    #[error("Could not render photo: {0}")]
    Render(#[from] RenderError),

    /// The settings would not describe a terminating search.
    #[error("Invalid compression settings: {0}")]
    InvalidConfig(String),

    /// The best-effort result is larger than a hard transport limit.
    #[error("Encoded photo is {size} bytes, over the {limit} byte limit")]
    BudgetExceeded { size: usize, limit: usize },
}

impl From<EncodeError> for CompressError {
    fn from(err: EncodeError) -> Self {
        CompressError::Render(RenderError::EncodingFailed(err.to_string()))
    }
}

impl CompressError {
    /// Whether retrying with the same input could ever succeed.
    ///
    /// Decode and render failures are properties of the input; only a budget
    /// miss can be resolved by the caller picking different settings.
    pub fn is_input_failure(&self) -> bool {
        matches!(self, CompressError::Decode(_) | CompressError::Render(_))
    }
}

/// One render+encode step of the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingAttempt {
    pub width: u32,
    pub height: u32,
    /// Fractional JPEG quality in (0, 1].
    pub quality: f32,
    /// Encoded size in bytes.
    pub size: usize,
}

/// A JPEG produced by the search, plus how it was reached.
#[derive(Debug, Clone)]
pub struct EncodedResult {
    /// JPEG bytes of the final attempt.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: f32,
    /// Budget the search was aiming for.
    pub target_bytes: usize,
    /// Every attempt in order; the last entry describes `bytes`.
    pub attempts: Vec<EncodingAttempt>,
}

impl EncodedResult {
    /// MIME type of the payload.
    pub const MIME_TYPE: &'static str = "image/jpeg";

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the search met its byte budget.
    pub fn within_budget(&self) -> bool {
        self.size() <= self.target_bytes
    }

    /// Number of render+encode steps that were run.
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Turn an oversized best-effort result into an error.
    ///
    /// `limit` is usually the hard limit of the transport the photo is about
    /// to travel over, which may be looser than the search budget.
    pub fn require_within(self, limit: usize) -> Result<Self, CompressError> {
        if self.size() > limit {
            return Err(CompressError::BudgetExceeded {
                size: self.size(),
                limit,
            });
        }
        Ok(self)
    }
}
