//! Decode/encode capability used by the search.

use crate::decode::{decode_image, DecodeError, SourceImage};
use crate::encode::{encode_surface, EncodeError};
use crate::render::Surface;

/// The two codec operations the re-encoder depends on.
///
/// Implementations must not keep state between calls; the search may be run
/// for several photos at once with the same codec.
pub trait Codec {
    /// Decode arbitrary image bytes into an RGBA source.
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError>;

    /// Encode an opaque surface as JPEG at a fractional quality in (0, 1].
    fn encode_jpeg(&self, surface: &Surface, quality: f32) -> Result<Vec<u8>, EncodeError>;
}

/// [`Codec`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError> {
        decode_image(bytes)
    }

    fn encode_jpeg(&self, surface: &Surface, quality: f32) -> Result<Vec<u8>, EncodeError> {
        encode_surface(surface, quality)
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError> {
        (**self).decode(bytes)
    }

    fn encode_jpeg(&self, surface: &Surface, quality: f32) -> Result<Vec<u8>, EncodeError> {
        (**self).encode_jpeg(surface, quality)
    }
}
