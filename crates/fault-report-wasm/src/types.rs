//! WASM-compatible wrapper types for compressed photos.
//!
//! This module provides JavaScript-friendly types that wrap the core result
//! types, handling the conversion between Rust and JavaScript representations.

use fault_report_core::EncodedResult;
use wasm_bindgen::prelude::*;

/// A compressed photo wrapper for JavaScript.
///
/// # Memory Management
///
/// The JPEG bytes live in WASM memory. `bytes()` copies them into a new
/// `Uint8Array`; `dataUrl()` builds the base64 string the email template
/// expects. Call `free()` once the photo has been sent to release the buffer
/// early, or let wasm-bindgen's finalizer do it.
#[wasm_bindgen]
pub struct JsEncodedResult {
    inner: EncodedResult,
}

#[wasm_bindgen]
impl JsEncodedResult {
    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Width of the final attempt in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height of the final attempt in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Fractional JPEG quality of the final attempt
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.quality
    }

    /// Whether the photo met the byte budget it was compressed for
    #[wasm_bindgen(getter, js_name = withinBudget)]
    pub fn within_budget(&self) -> bool {
        self.inner.within_budget()
    }

    /// Number of render+encode attempts the search made
    #[wasm_bindgen(getter, js_name = attemptCount)]
    pub fn attempt_count(&self) -> usize {
        self.inner.attempt_count()
    }

    /// Length of the data URL, for checking against the template limit
    #[wasm_bindgen(getter, js_name = payloadLength)]
    pub fn payload_length(&self) -> usize {
        self.inner.payload_len()
    }

    /// MIME type of the bytes (always `image/jpeg`)
    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        EncodedResult::MIME_TYPE.to_string()
    }

    /// Returns the JPEG bytes as a new Uint8Array.
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.inner.bytes.as_slice())
    }

    /// Returns the JPEG as a `data:image/jpeg;base64,...` string.
    #[wasm_bindgen(js_name = dataUrl)]
    pub fn data_url(&self) -> String {
        self.inner.to_data_url()
    }

    /// Returns the attempt history as an array of
    /// `{ width, height, quality, size }` objects.
    pub fn attempts(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.attempts)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsEncodedResult {
    pub(crate) fn from_result(inner: EncodedResult) -> Self {
        Self { inner }
    }

    /// Borrow the core result.
    pub(crate) fn inner(&self) -> &EncodedResult {
        &self.inner
    }
}
