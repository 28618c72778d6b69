//! The size-bounded re-encode loop.

use tracing::{debug, warn};

use super::{
    Codec, CompressError, CompressionConfig, EncodedResult, EncodingAttempt, ImageCodec,
    MAX_ATTEMPTS_LIMIT,
};
use crate::decode::{fit_scale, scale_dimensions, SourceImage};
use crate::render::Renderer;

/// Re-encode `bytes` as a JPEG that fits `config.target_bytes` if it can.
///
/// Decodes once, caps the longer edge at `config.start_max_dimension`, then
/// alternates render+encode with a multiplicative shrink and a floored quality
/// decrease until the budget is met or `config.max_attempts` is reached. A miss
/// is not an error: the last attempt is returned and
/// [`EncodedResult::within_budget`] reports `false`.
///
/// # Errors
///
/// * `CompressError::InvalidConfig` if the settings fail validation
/// * `CompressError::Decode` if the bytes are not a decodable image
/// * `CompressError::Render` if no surface could be drawn or encoded
pub fn compress_to_budget(
    bytes: &[u8],
    config: &CompressionConfig,
) -> Result<EncodedResult, CompressError> {
    compress_with(&ImageCodec, bytes, config)
}

/// Like [`compress_to_budget`], but a budget miss is an error.
pub fn compress_to_budget_strict(
    bytes: &[u8],
    config: &CompressionConfig,
) -> Result<EncodedResult, CompressError> {
    compress_to_budget(bytes, config)?.require_within(config.target_bytes)
}

/// Run the search with a caller-supplied codec.
pub fn compress_with<C: Codec + ?Sized>(
    codec: &C,
    bytes: &[u8],
    config: &CompressionConfig,
) -> Result<EncodedResult, CompressError> {
    config.validate()?;
    let source = codec.decode(bytes)?;
    search(codec, &source, config)
}

/// Run the search on an already decoded image.
pub fn compress_source_with<C: Codec + ?Sized>(
    codec: &C,
    source: &SourceImage,
    config: &CompressionConfig,
) -> Result<EncodedResult, CompressError> {
    config.validate()?;
    search(codec, source, config)
}

fn search<C: Codec + ?Sized>(
    codec: &C,
    source: &SourceImage,
    config: &CompressionConfig,
) -> Result<EncodedResult, CompressError> {
    let renderer = Renderer::new(source, config.filter)?;
    let (src_width, src_height) = source.dimensions();

    let mut scale = fit_scale(src_width, src_height, config.start_max_dimension);
    let mut quality = config.start_quality;
    let mut attempts = Vec::with_capacity(config.max_attempts.min(MAX_ATTEMPTS_LIMIT) as usize);

    loop {
        let (width, height) = scale_dimensions(src_width, src_height, scale);
        let surface = renderer.render(width, height)?;
        let bytes = codec.encode_jpeg(&surface, quality)?;
        let size = bytes.len();

        attempts.push(EncodingAttempt {
            width,
            height,
            quality,
            size,
        });
        debug!(
            attempt = attempts.len(),
            width, height, quality, size, "encoded attempt"
        );

        let within_budget = size <= config.target_bytes;
        if within_budget || attempts.len() >= config.max_attempts as usize {
            if within_budget {
                debug!(attempts = attempts.len(), size, "photo fits budget");
            } else {
                warn!(
                    attempts = attempts.len(),
                    size,
                    target = config.target_bytes,
                    "photo still over budget after final attempt"
                );
            }
            return Ok(EncodedResult {
                bytes,
                width,
                height,
                quality,
                target_bytes: config.target_bytes,
                attempts,
            });
        }

        scale *= config.shrink_ratio as f64;
        quality = (quality - config.quality_step).max(config.quality_floor);
    }
}
