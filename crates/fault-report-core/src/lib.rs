//! Fault Report Core - photo handling for the resident fault report form
//!
//! Residents attach photos to a report that reaches the building
//! administrator by email. The email provider limits payload size, so this
//! crate turns arbitrary phone photos into JPEGs that fit a byte budget.
//!
//! # Module Structure
//!
//! - `decode` - bytes to RGBA `SourceImage`, EXIF orientation, working dimensions
//! - `render` - flattening onto an opaque white surface at a working size
//! - `encode` - JPEG encoding of a surface
//! - `compress` - the size-bounded re-encode search and its settings
//! - `intake` - which selected files the form accepts
//! - `payload` - base64 data URLs and transport budget arithmetic

pub mod compress;
pub mod decode;
pub mod encode;
pub mod intake;
pub mod payload;
pub mod render;

pub use compress::{
    compress_to_budget, compress_to_budget_strict, CompressError, CompressionConfig,
    EncodedResult, EncodingAttempt,
};
pub use decode::{decode_image, DecodeError, SourceImage};
pub use intake::{IntakeError, IntakeReport, IntakeRules, PhotoFormat};
pub use render::RenderError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_cover_the_pipeline() {
        let config = CompressionConfig::default();
        assert!(config.validate().is_ok());

        let err = compress_to_budget(&[], &config).unwrap_err();
        assert!(matches!(err, CompressError::Decode(_)));
    }

    #[test]
    fn test_budget_from_transport_limit() {
        // A 48 KiB photo fits a 65 KiB template payload, not a 64 KiB one
        let target = CompressionConfig::email_attachment().target_bytes;
        assert!(payload::encoded_payload_len(target) <= 65 * 1024);
        assert!(payload::max_raw_bytes_for_payload(64 * 1024) < target);
    }
}
