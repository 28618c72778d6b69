//! Photo selection rules for the report form.
//!
//! Residents may attach a small number of photos. Adding a batch that would
//! push the total over the limit is refused outright; within an accepted
//! batch, files that are too large or not JPEG/PNG are skipped individually
//! and reported back so the form can tell the resident what was dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum number of photos per report.
pub const MAX_FILES: usize = 2;

/// Default maximum size of a single selected file (2 MiB).
pub const MAX_FILE_BYTES: usize = 2 * 1024 * 1024;

/// Photo formats the form accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoFormat {
    Jpeg,
    Png,
}

impl PhotoFormat {
    /// MIME type as reported by browsers.
    pub fn mime_type(self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "image/jpeg",
            PhotoFormat::Png => "image/png",
        }
    }
}

/// Identify the photo format from its leading bytes.
pub fn sniff_format(bytes: &[u8]) -> Option<PhotoFormat> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => Some(PhotoFormat::Jpeg),
        image::ImageFormat::Png => Some(PhotoFormat::Png),
        _ => None,
    }
}

/// Errors that refuse a whole batch of photos.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("At most {max} photos can be attached ({selected} already selected, {adding} added)")]
    TooManyFiles {
        selected: usize,
        adding: usize,
        max: usize,
    },
}

/// Why a single file was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum RejectReason {
    TooLarge { size: usize, max: usize },
    UnsupportedFormat,
}

/// A skipped file and the reason it was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub index: usize,
    #[serde(flatten)]
    pub reason: RejectReason,
}

/// Outcome of checking one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakeReport {
    /// Indices into the batch, with the sniffed format of each.
    pub accepted: Vec<(usize, PhotoFormat)>,
    pub rejected: Vec<Rejection>,
}

impl IntakeReport {
    /// Whether every file in the batch was accepted.
    pub fn all_accepted(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Limits applied when photos are selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeRules {
    pub max_files: usize,
    pub max_file_bytes: usize,
}

impl Default for IntakeRules {
    fn default() -> Self {
        Self {
            max_files: MAX_FILES,
            max_file_bytes: MAX_FILE_BYTES,
        }
    }
}

impl IntakeRules {
    /// Refuse a batch that would exceed the photo count.
    pub fn check_count(&self, selected: usize, adding: usize) -> Result<(), IntakeError> {
        if selected.saturating_add(adding) > self.max_files {
            return Err(IntakeError::TooManyFiles {
                selected,
                adding,
                max: self.max_files,
            });
        }
        Ok(())
    }

    /// Check a single file's size and format.
    pub fn check_file(&self, bytes: &[u8]) -> Result<PhotoFormat, RejectReason> {
        if bytes.len() > self.max_file_bytes {
            return Err(RejectReason::TooLarge {
                size: bytes.len(),
                max: self.max_file_bytes,
            });
        }
        sniff_format(bytes).ok_or(RejectReason::UnsupportedFormat)
    }

    /// Check a batch being added to `selected` already chosen photos.
    ///
    /// The count is checked against the whole batch before any file is
    /// inspected, so an oversized batch is refused even if some files in it
    /// would have been skipped anyway.
    pub fn check_batch<B: AsRef<[u8]>>(
        &self,
        selected: usize,
        batch: &[B],
    ) -> Result<IntakeReport, IntakeError> {
        self.check_count(selected, batch.len())?;

        let mut report = IntakeReport::default();
        for (index, bytes) in batch.iter().enumerate() {
            match self.check_file(bytes.as_ref()) {
                Ok(format) => report.accepted.push((index, format)),
                Err(reason) => {
                    tracing::debug!(index, ?reason, "photo skipped");
                    report.rejected.push(Rejection { index, reason });
                }
            }
        }
        Ok(report)
    }
}
