//! Handler error types.

use serde::Serialize;
use thiserror::Error;

use vframe_media::MediaError;
use vframe_models::{EventError, MissingField};
use vframe_storage::StorageError;

pub type HandlerResult<T> = Result<T, HandlerError>;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Source object s3://{bucket}/{key} does not exist")]
    SourceNotFound { bucket: String, key: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Malformed event: {0}")]
    MalformedEvent(#[from] EventError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<MissingField> for HandlerError {
    fn from(err: MissingField) -> Self {
        Self::MissingField(err.0)
    }
}

impl HandlerError {
    pub fn source_not_found(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::SourceNotFound {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MissingField(_)
            | HandlerError::SourceNotFound { .. }
            | HandlerError::InvalidBody(_)
            | HandlerError::MalformedEvent(_) => 400,
            HandlerError::Media(_) | HandlerError::Storage(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Failure stage label for metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            HandlerError::MissingField(_)
            | HandlerError::InvalidBody(_)
            | HandlerError::MalformedEvent(_) => "validation",
            HandlerError::SourceNotFound { .. } => "not_found",
            HandlerError::Media(e) if e.is_probe_failure() => "probe",
            HandlerError::Media(_) => "extract",
            HandlerError::Storage(_) => "storage",
        }
    }

    /// JSON body describing this error.
    ///
    /// Internal details are hidden in production.
    pub fn to_response(&self, production: bool) -> ErrorResponse {
        let detail = if !self.is_client_error() && production {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let mut body = ErrorResponse {
            detail,
            field: None,
            bucket_name: None,
            file: None,
        };

        match self {
            HandlerError::MissingField(field) => body.field = Some(field.to_string()),
            HandlerError::SourceNotFound { bucket, key } => {
                body.bucket_name = Some(bucket.clone());
                body.file = Some(key.clone());
            }
            _ => {}
        }

        body
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}
