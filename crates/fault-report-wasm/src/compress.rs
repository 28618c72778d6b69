//! Photo compression WASM bindings.
//!
//! This module exposes the size-bounded re-encoder to the report form, which
//! calls it once per selected photo before building the email payload.
//!
//! # Functions
//!
//! - [`compress_photo`] - Re-encode a photo to fit a byte budget (best effort)
//! - [`compress_photo_strict`] - Same, but a budget miss is an error
//! - [`check_transport_limit`] - Fail if a result exceeds a hard transport limit
//! - [`default_config`] / [`compact_config`] - Preset settings objects
//! - [`encoded_payload_len`] / [`max_raw_bytes_for_payload`] - Data URL arithmetic
//!
//! # Example
//!
//! ```typescript
//! import { compress_photo, check_transport_limit } from '@fault-report/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const photo = compress_photo(bytes, { targetBytes: 48 * 1024 });
//! check_transport_limit(photo, 50_000);
//! templateParams.my_photo = photo.dataUrl();
//! photo.free();
//! ```

use crate::types::JsEncodedResult;
use fault_report_core::compress::{self, CompressionConfig, EncodedResult};
use fault_report_core::payload;
use wasm_bindgen::prelude::*;

/// Re-encode a photo as a JPEG that fits the configured byte budget.
///
/// # Arguments
///
/// * `bytes` - The selected file's bytes as a `Uint8Array` (JPEG or PNG)
/// * `config` - Optional partial settings object; missing fields use the
///   email attachment preset (`targetBytes` 48 KiB, `startMaxDimension` 800,
///   `startQuality` 0.9, `shrinkRatio` 0.75, `qualityStep` 0.1,
///   `qualityFloor` 0.5, `maxAttempts` 10)
///
/// # Returns
///
/// A `JsEncodedResult`. If the budget could not be met within `maxAttempts`,
/// the last attempt is returned with `withinBudget === false`.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the bytes are not a
/// decodable image, or the photo could not be rendered.
#[wasm_bindgen]
pub fn compress_photo(bytes: &[u8], config: JsValue) -> Result<JsEncodedResult, JsValue> {
    let config = config_from_js(config)?;
    let result = compress::compress_to_budget(bytes, &config).map_err(compress_error_to_js)?;
    if let Some(message) = budget_miss_message(&result) {
        web_sys::console::warn_1(&JsValue::from_str(&message));
    }
    Ok(JsEncodedResult::from_result(result))
}

/// Like [`compress_photo`], but a result over `targetBytes` is an error.
#[wasm_bindgen]
pub fn compress_photo_strict(bytes: &[u8], config: JsValue) -> Result<JsEncodedResult, JsValue> {
    let config = config_from_js(config)?;
    compress::compress_to_budget_strict(bytes, &config)
        .map(JsEncodedResult::from_result)
        .map_err(compress_error_to_js)
}

/// Fail if a compressed photo is larger than a hard transport limit.
///
/// Use this right before sending, with the provider's actual limit, to turn a
/// best-effort result into a clear error instead of a rejected request.
#[wasm_bindgen]
pub fn check_transport_limit(result: &JsEncodedResult, limit: usize) -> Result<(), JsValue> {
    check_limit(result, limit).map_err(compress_error_to_js)
}

/// Settings object for a photo sent inline with the email (48 KiB budget).
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CompressionConfig::email_attachment())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Settings object for several photos sharing one email (10 KiB budget).
#[wasm_bindgen]
pub fn compact_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CompressionConfig::compact())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Length of the data URL for `raw_len` JPEG bytes.
#[wasm_bindgen]
pub fn encoded_payload_len(raw_len: usize) -> usize {
    payload::encoded_payload_len(raw_len)
}

/// Largest JPEG whose data URL fits in `payload_limit` bytes.
#[wasm_bindgen]
pub fn max_raw_bytes_for_payload(payload_limit: usize) -> usize {
    payload::max_raw_bytes_for_payload(payload_limit)
}

/// Console warning for a best-effort result that missed its budget.
///
/// The core logs the same event through `tracing`, which has no subscriber
/// in the browser.
fn budget_miss_message(result: &EncodedResult) -> Option<String> {
    if result.within_budget() {
        return None;
    }
    Some(format!(
        "Photo is {} bytes after {} attempts, over the {} byte budget",
        result.size(),
        result.attempt_count(),
        result.target_bytes
    ))
}

/// Message shown to the resident for a failed compression.
///
/// Decode and render failures depend only on the photo, so retrying the same
/// file cannot help.
fn compress_error_message(err: &compress::CompressError) -> String {
    if err.is_input_failure() {
        format!("{}. Please choose a different photo.", err)
    } else {
        err.to_string()
    }
}

fn compress_error_to_js(err: compress::CompressError) -> JsValue {
    to_js_error(compress_error_message(&err))
}

fn check_limit(result: &JsEncodedResult, limit: usize) -> Result<(), compress::CompressError> {
    let size = result.inner().size();
    if size > limit {
        return Err(compress::CompressError::BudgetExceeded { size, limit });
    }
    Ok(())
}

/// Parse an optional settings object, falling back to the default preset.
fn config_from_js(config: JsValue) -> Result<CompressionConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(CompressionConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid compression settings: {}", e)))
}

/// Log an error to the browser console and convert it for JavaScript.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    let message = JsValue::from_str(&err.to_string());
    web_sys::console::warn_1(&message);
    message
}
