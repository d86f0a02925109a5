//! Shared data models for the video frame handler.
//!
//! This crate provides Serde-serializable types for:
//! - Extraction requests and results
//! - The request-body shape of the synchronous entry point
//! - The object-created event envelope
//! - Output key derivation and shared constants

pub mod constants;
pub mod event;
pub mod request;
pub mod result;
pub mod utils;

// Re-export common types
pub use constants::{
    DEFAULT_OUTPUT_PATH, DEFAULT_TIME_OFFSET, DURATION_METADATA_KEY, JPEG_CONTENT_TYPE,
    OBJECT_CREATED, PRESIGN_EXPIRY_SECS,
};
pub use event::{EventError, ObjectRef, StorageEvent};
pub use request::{ExtractionRequest, FrameRequest, MissingField};
pub use result::ExtractionResult;
pub use utils::{basename, format_duration, s3_uri};
