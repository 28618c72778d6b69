//! JPEG encoding for outgoing photos.
//!
//! Uses the `image` crate's baseline JPEG encoder. Callers in this crate think
//! of quality as a fraction in (0, 1]; the encoder wants a 1-100 integer, so
//! [`quality_percent`] is the single place that conversion happens.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::render::Surface;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Convert a fractional quality in (0, 1] to the encoder's 1-100 scale.
///
/// Non-finite values map to 1. The mapping is monotonic, so a non-increasing
/// sequence of fractions stays non-increasing after conversion.
pub fn quality_percent(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a rendered surface at a fractional quality.
pub fn encode_surface(surface: &Surface, quality: f32) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(
        &surface.pixels,
        surface.width,
        surface.height,
        quality_percent(quality),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];

        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];

        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data_short() {
        let pixels = vec![128u8; 99 * 100 * 3]; // One row short

        let result = encode_jpeg(&pixels, 100, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_width() {
        let result = encode_jpeg(&[], 0, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_quality_percent_mapping() {
        assert_eq!(quality_percent(0.9), 90);
        assert_eq!(quality_percent(0.5), 50);
        assert_eq!(quality_percent(1.0), 100);
        assert_eq!(quality_percent(0.001), 1);
        assert_eq!(quality_percent(2.0), 100);
        assert_eq!(quality_percent(f32::NAN), 1);
    }

    #[test]
    fn test_encode_surface() {
        let surface = Surface {
            width: 8,
            height: 4,
            pixels: vec![200u8; 8 * 4 * 3],
        };
        let jpeg = encode_surface(&surface, 0.7).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }

    #[test]
    fn test_lower_quality_is_smaller_for_detailed_content() {
        let (width, height) = (128u32, 128u32);
        let pixels: Vec<u8> = (0..(width * height * 3) as usize)
            .map(|i| ((i * 37) % 256) as u8)
            .collect();

        let high = encode_jpeg(&pixels, width, height, 95).unwrap();
        let low = encode_jpeg(&pixels, width, height, 30).unwrap();
        assert!(low.len() < high.len(), "low={} high={}", low.len(), high.len());
    }
}
