//! Size-bounded photo re-encoding.
//!
//! The email provider behind the report form caps the size of a message, so
//! every photo is re-encoded as a JPEG that fits a byte budget before it is
//! attached. JPEG encoders have no "target size" knob; instead the search
//! starts from a capped working size and a high quality, then shrinks both
//! geometrically until the output fits or the attempt ceiling is hit.
//!
//! # Contract
//!
//! - Input: image bytes (any format the codec decodes) plus a [`CompressionConfig`]
//! - Output: an [`EncodedResult`] holding the JPEG and the attempt history
//! - A budget miss after the final attempt is a successful, best-effort result;
//!   use [`EncodedResult::require_within`] or [`compress_to_budget_strict`] to
//!   treat it as an error
//! - Decode and render failures are terminal and should not be retried with
//!   the same input
//!
//! # Concurrency
//!
//! Calls share nothing. Several photos may be compressed at once; any
//! wall-clock limit or cancellation belongs to the caller.
//!
//! # Examples
//!
//! ```ignore
//! use fault_report_core::compress::{compress_to_budget, CompressionConfig};
//!
//! let bytes = std::fs::read("leak.jpg").unwrap();
//! let result = compress_to_budget(&bytes, &CompressionConfig::email_attachment()).unwrap();
//! println!("{} bytes after {} attempts", result.size(), result.attempt_count());
//! ```

mod codec;
mod config;
mod search;
mod types;

pub use codec::{Codec, ImageCodec};
pub use config::{CompressionConfig, KIB, MAX_ATTEMPTS_LIMIT};
pub use search::{compress_source_with, compress_to_budget, compress_to_budget_strict, compress_with};
pub use types::{CompressError, EncodedResult, EncodingAttempt};
