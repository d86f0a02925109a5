//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while probing or extracting.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found: {0}")]
    FfmpegNotFound(PathBuf),

    #[error("FFprobe not found: {0}")]
    FfprobeNotFound(PathBuf),

    /// The probe produced no usable duration (malformed or unsupported media).
    #[error("Duration probe failed: {message}")]
    ProbeFailed { message: String, output: String },

    /// The extractor produced no frame.
    #[error("Frame extraction failed: {message}")]
    ExtractionFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a probe failure error.
    pub fn probe_failed(message: impl Into<String>, output: impl Into<String>) -> Self {
        Self::ProbeFailed {
            message: message.into(),
            output: output.into(),
        }
    }

    /// Create an extraction failure error.
    pub fn extraction_failed(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::ExtractionFailed {
            message: message.into(),
            exit_code,
        }
    }

    /// Whether this failure came from the duration probe step.
    pub fn is_probe_failure(&self) -> bool {
        matches!(self, Self::ProbeFailed { .. } | Self::FfprobeNotFound(_))
    }
}
