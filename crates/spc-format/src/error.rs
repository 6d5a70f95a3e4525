//! Error types for SPC file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing SPC files.
#[derive(Debug, Error)]
pub enum SpcError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Buffer shorter than the fixed header block.
    #[error("file too small to be a valid SPC file: {len} bytes (need at least {min})")]
    FormatTooSmall { len: usize, min: usize },

    /// No sample payload could be read from the buffer.
    #[error("could not read Y data: no payload after the header")]
    NoPayloadFound,

    /// Strict parse refused a placeholder axis.
    #[error("header X range is implausible (first={first}, last={last}); placeholder axis rejected")]
    PlaceholderRejected { first: f64, last: f64 },

    /// Replacement samples differ in length from the parsed samples.
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Document was not parsed from an existing file.
    #[error("no original data to preserve")]
    NoOriginalToPreserve,

    /// The parsed samples could not be found in the original buffer.
    #[error("could not locate {samples} Y samples in original file")]
    PayloadLocationNotFound { samples: usize },

    /// Patch descriptor reaches past the end of the buffer.
    #[error("patch at offset {offset} ({len} bytes) exceeds buffer of {buffer_len} bytes")]
    PatchOutOfBounds {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    /// Two patch descriptors cover the same bytes.
    #[error("patch at offset {offset} overlaps a previous patch ending at {previous_end}")]
    PatchOverlap { offset: usize, previous_end: usize },

    /// Patches were planned against a buffer of a different length.
    #[error("patch set was planned for {expected} bytes, buffer has {actual}")]
    PatchTargetMismatch { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SPC operations.
pub type Result<T> = std::result::Result<T, SpcError>;

impl SpcError {
    /// Create a FormatTooSmall error for a buffer of `len` bytes.
    pub fn too_small(len: usize) -> Self {
        Self::FormatTooSmall {
            len,
            min: crate::header::HEADER_LEN,
        }
    }

    /// Create a LengthMismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Whether this error came from the write path.
    #[must_use]
    pub fn is_write_error(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. }
                | Self::NoOriginalToPreserve
                | Self::PayloadLocationNotFound { .. }
                | Self::PatchOutOfBounds { .. }
                | Self::PatchOverlap { .. }
                | Self::PatchTargetMismatch { .. }
        )
    }
}
