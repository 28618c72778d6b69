//! Photo selection WASM bindings.
//!
//! Called from the form's file input handler before any photo is compressed.

use crate::compress::to_js_error;
use fault_report_core::intake::{sniff_format, IntakeRules};
use wasm_bindgen::prelude::*;

/// Check a batch of selected files against the form's photo limits.
///
/// # Arguments
///
/// * `selected` - Number of photos already attached to the report
/// * `files` - Array of `Uint8Array`, one per newly selected file
/// * `rules` - Optional `{ maxFiles, maxFileBytes }`; defaults to 2 files of 2 MiB
///
/// # Returns
///
/// `{ accepted: [[index, "jpeg" | "png"], ...], rejected: [{ index, reason, ... }] }`
///
/// # Errors
///
/// Throws if the batch would push the photo count over `maxFiles`; no file in
/// the batch is accepted in that case.
#[wasm_bindgen]
pub fn check_photos(
    selected: usize,
    files: js_sys::Array,
    rules: JsValue,
) -> Result<JsValue, JsValue> {
    let rules = rules_from_js(rules)?;
    let batch: Vec<Vec<u8>> = files
        .iter()
        .map(|file| js_sys::Uint8Array::new(&file).to_vec())
        .collect();

    let report = rules.check_batch(selected, &batch).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type of a supported photo, or `undefined` for anything else.
#[wasm_bindgen]
pub fn photo_mime_type(bytes: &[u8]) -> Option<String> {
    sniff_format(bytes).map(|format| format.mime_type().to_string())
}

fn rules_from_js(rules: JsValue) -> Result<IntakeRules, JsValue> {
    if rules.is_undefined() || rules.is_null() {
        return Ok(IntakeRules::default());
    }
    serde_wasm_bindgen::from_value(rules)
        .map_err(|e| JsValue::from_str(&format!("Invalid photo rules: {}", e)))
}
