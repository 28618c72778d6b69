//! Photo decoding for the report form.
//!
//! This module provides functionality for:
//! - Decoding user-supplied photos (JPEG, PNG) into RGBA pixel buffers
//! - Applying EXIF orientation so phone photos come out upright
//! - Computing aspect-preserving working dimensions
//!
//! # Architecture
//!
//! Decoding runs once per compression call. The decoded `SourceImage` is
//! read-only afterwards; every re-encode attempt renders from it.
//!
//! # Examples
//!
//! ```ignore
//! use fault_report_core::decode::decode_image;
//!
//! let bytes = std::fs::read("leak.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} photo", image.width, image.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::decode_image;
pub use resize::{fit_scale, scale_dimensions};
pub use types::{DecodeError, FilterType, Orientation, SourceImage};

#[cfg(test)]
pub(crate) use reader::with_exif_orientation;
