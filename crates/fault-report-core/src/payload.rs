//! Email payload helpers.
//!
//! The notification email carries each photo as a base64 data URL inside the
//! template parameters. Base64 inflates the JPEG by a third, so the byte
//! budget handed to the re-encoder has to be derived from the transport limit
//! with that overhead taken off.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::compress::EncodedResult;

/// Prefix of a JPEG data URL.
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Length of the data URL produced for `raw_len` JPEG bytes.
pub fn encoded_payload_len(raw_len: usize) -> usize {
    JPEG_DATA_URL_PREFIX.len() + raw_len.div_ceil(3) * 4
}

/// Largest JPEG whose data URL fits in `payload_limit` bytes.
///
/// Returns 0 when even the prefix does not fit.
pub fn max_raw_bytes_for_payload(payload_limit: usize) -> usize {
    let available = payload_limit.saturating_sub(JPEG_DATA_URL_PREFIX.len());
    (available / 4) * 3
}

/// Render raw JPEG bytes as a data URL.
pub fn jpeg_data_url(bytes: &[u8]) -> String {
    let mut url = String::with_capacity(encoded_payload_len(bytes.len()));
    url.push_str(JPEG_DATA_URL_PREFIX);
    STANDARD.encode_string(bytes, &mut url);
    url
}

impl EncodedResult {
    /// The JPEG as a `data:image/jpeg;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        jpeg_data_url(&self.bytes)
    }

    /// Size of [`EncodedResult::to_data_url`] without building it.
    pub fn payload_len(&self) -> usize {
        encoded_payload_len(self.size())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the predicted length matches the actual data URL.
        #[test]
        fn prop_payload_len_matches(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(jpeg_data_url(&bytes).len(), encoded_payload_len(bytes.len()));
        }

        /// Property: the derived raw budget always fits the payload limit.
        #[test]
        fn prop_raw_budget_fits(limit in 0usize..200_000) {
            let raw = max_raw_bytes_for_payload(limit);
            prop_assert!(raw == 0 || encoded_payload_len(raw) <= limit);
        }
    }
}
