//! Fault Report WASM - WebAssembly bindings for the fault report form
//!
//! This crate exposes fault-report-core's photo handling to the browser so
//! photos are checked and shrunk on the resident's device before the report
//! email is sent.
//!
//! # Module Structure
//!
//! - `intake` - Photo selection checks (count, size, format)
//! - `compress` - Size-bounded JPEG re-encoding and presets
//! - `types` - WASM-compatible wrapper for the compressed photo
//!
//! # Logging
//!
//! The core reports each attempt through `tracing`, and no subscriber is
//! installed here, so those events are dropped in the browser. Errors and
//! budget misses are written to the browser console instead.
//!
//! # Usage
//!
//! ```typescript
//! import init, { check_photos, compress_photo } from '@fault-report/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const report = check_photos(photos.length, [bytes]);
//! const photo = compress_photo(bytes);
//! console.log(`${photo.width}x${photo.height}, ${photo.size} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod intake;
mod types;

// Re-export public types
pub use compress::{
    check_transport_limit, compact_config, compress_photo, compress_photo_strict,
    default_config, encoded_payload_len, max_raw_bytes_for_payload,
};
pub use intake::{check_photos, photo_mime_type};
pub use types::JsEncodedResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
