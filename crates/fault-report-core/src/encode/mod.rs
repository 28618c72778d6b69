//! JPEG encoding for outgoing photos.
//!
//! All operations are synchronous and allocate a fresh output buffer per call.
//!
//! # Examples
//!
//! ```ignore
//! use fault_report_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, encode_surface, quality_percent, EncodeError};
