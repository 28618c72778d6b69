//! Rendering a photo onto an opaque drawing surface.
//!
//! JPEG has no alpha channel, so transparent regions are composited onto a
//! white background before anything is resampled or encoded. The flattened
//! copy is made once per source image; each attempt only resamples it.

use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::decode::{FilterType, SourceImage};

/// Largest edge a drawing surface may have.
pub const MAX_SURFACE_EDGE: u32 = 32_767;

/// Largest pixel count a drawing surface may have.
pub const MAX_SURFACE_AREA: u64 = 268_435_456;

/// Background colour used where the source is transparent.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Errors that can occur while producing a drawing surface.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Width or height is zero
    #[error("Invalid surface dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Requested surface exceeds the drawable limits
    #[error("Surface of {width}x{height} exceeds the drawable limit")]
    SurfaceTooLarge { width: u32, height: u32 },

    /// Source pixel buffer doesn't match its dimensions
    #[error("Invalid source pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidSourceData { expected: usize, actual: usize },

    /// The surface could not be encoded
    #[error("Surface encoding failed: {0}")]
    EncodingFailed(String),
}

/// An opaque RGB drawing surface, 3 bytes per pixel in row-major order.
#[derive(Debug, Clone)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Surface {
    fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Read a single pixel, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}

/// Renders one source image at any number of working sizes.
pub struct Renderer {
    flattened: RgbImage,
    filter: FilterType,
}

impl Renderer {
    /// Flatten `source` onto the white background.
    ///
    /// Drawable limits apply to the surfaces produced by [`Renderer::render`],
    /// not to the source, so a source larger than any surface is fine.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidDimensions` for an empty source, or
    /// `RenderError::InvalidSourceData` if the pixel buffer length is wrong.
    pub fn new(source: &SourceImage, filter: FilterType) -> Result<Self, RenderError> {
        if source.width == 0 || source.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: source.width,
                height: source.height,
            });
        }

        let view = source
            .as_rgba_view()
            .ok_or(RenderError::InvalidSourceData {
                expected: source.width as usize * source.height as usize * 4,
                actual: source.pixels.len(),
            })?;

        let flattened = if source.has_alpha {
            RgbImage::from_fn(source.width, source.height, |x, y| {
                let [r, g, b, a] = view.get_pixel(x, y).0;
                Rgb([
                    composite(r, a, BACKGROUND.0[0]),
                    composite(g, a, BACKGROUND.0[1]),
                    composite(b, a, BACKGROUND.0[2]),
                ])
            })
        } else {
            RgbImage::from_fn(source.width, source.height, |x, y| {
                let [r, g, b, _] = view.get_pixel(x, y).0;
                Rgb([r, g, b])
            })
        };

        Ok(Self { flattened, filter })
    }

    /// Produce a surface of exactly `width` x `height`.
    pub fn render(&self, width: u32, height: u32) -> Result<Surface, RenderError> {
        check_surface(width, height)?;

        if self.flattened.dimensions() == (width, height) {
            return Ok(Surface::from_rgb_image(self.flattened.clone()));
        }

        let resized =
            image::imageops::resize(&self.flattened, width, height, self.filter.to_image_filter());
        Ok(Surface::from_rgb_image(resized))
    }
}

fn check_surface(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    if width > MAX_SURFACE_EDGE
        || height > MAX_SURFACE_EDGE
        || width as u64 * height as u64 > MAX_SURFACE_AREA
    {
        return Err(RenderError::SurfaceTooLarge { width, height });
    }
    Ok(())
}

/// Source-over blend of one channel onto an opaque background.
#[inline]
fn composite(channel: u8, alpha: u8, background: u8) -> u8 {
    let a = alpha as u32;
    let value = channel as u32 * a + background as u32 * (255 - a);
    ((value + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4], has_alpha: bool) -> SourceImage {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        SourceImage::new(width, height, pixels, has_alpha)
    }

    fn render(
        source: &SourceImage,
        width: u32,
        height: u32,
        filter: FilterType,
    ) -> Result<Surface, RenderError> {
        Renderer::new(source, filter)?.render(width, height)
    }

    #[test]
    fn test_composite_extremes() {
        assert_eq!(composite(10, 255, 255), 10);
        assert_eq!(composite(10, 0, 255), 255);
        assert_eq!(composite(0, 128, 255), 127);
    }

    #[test]
    fn test_transparent_becomes_white() {
        let src = solid(4, 4, [0, 0, 0, 0], true);
        let surface = render(&src, 4, 4, FilterType::Bilinear).unwrap();

        assert!(surface.pixels.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_opaque_ignores_alpha_byte() {
        // has_alpha = false means the alpha byte is padding
        let src = solid(2, 2, [200, 100, 50, 0], false);
        let surface = render(&src, 2, 2, FilterType::Nearest).unwrap();

        assert_eq!(surface.pixel(0, 0), Some([200, 100, 50]));
    }

    #[test]
    fn test_render_resizes() {
        let src = solid(100, 50, [30, 60, 90, 255], true);
        let surface = render(&src, 40, 20, FilterType::Bilinear).unwrap();

        assert_eq!((surface.width, surface.height), (40, 20));
        assert_eq!(surface.pixels.len(), 40 * 20 * 3);
        assert_eq!(surface.pixel(10, 10), Some([30, 60, 90]));
    }

    #[test]
    fn test_renderer_reused_across_sizes() {
        let src = solid(64, 48, [1, 2, 3, 255], false);
        let renderer = Renderer::new(&src, FilterType::Lanczos3).unwrap();

        for (w, h) in [(64, 48), (48, 36), (36, 27)] {
            let surface = renderer.render(w, h).unwrap();
            assert_eq!((surface.width, surface.height), (w, h));
        }
    }

    #[test]
    fn test_render_zero_dimensions_error() {
        let src = solid(4, 4, [0, 0, 0, 255], false);
        let renderer = Renderer::new(&src, FilterType::Bilinear).unwrap();

        assert!(matches!(
            renderer.render(0, 4),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_render_oversized_surface_error() {
        let src = solid(4, 4, [0, 0, 0, 255], false);
        let renderer = Renderer::new(&src, FilterType::Bilinear).unwrap();

        assert!(matches!(
            renderer.render(MAX_SURFACE_EDGE + 1, 1),
            Err(RenderError::SurfaceTooLarge { .. })
        ));
        assert!(matches!(
            renderer.render(20_000, 20_000),
            Err(RenderError::SurfaceTooLarge { .. })
        ));
    }

    #[test]
    fn test_source_wider_than_surface_limit() {
        let src = solid(MAX_SURFACE_EDGE + 233, 4, [90, 90, 90, 255], false);
        let renderer = Renderer::new(&src, FilterType::Bilinear).unwrap();

        let surface = renderer.render(800, 1).unwrap();
        assert_eq!((surface.width, surface.height), (800, 1));
    }

    #[test]
    fn test_empty_source_error() {
        let src = SourceImage {
            width: 0,
            height: 5,
            pixels: Vec::new(),
            has_alpha: false,
        };
        assert!(matches!(
            Renderer::new(&src, FilterType::Bilinear),
            Err(RenderError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_bad_source_buffer_error() {
        let src = SourceImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 10],
            has_alpha: false,
        };
        assert!(matches!(
            Renderer::new(&src, FilterType::Bilinear),
            Err(RenderError::InvalidSourceData {
                expected: 400,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_surface_pixel_out_of_bounds() {
        let src = solid(2, 2, [0, 0, 0, 255], false);
        let surface = render(&src, 2, 2, FilterType::Nearest).unwrap();
        assert_eq!(surface.pixel(2, 0), None);
    }
}
