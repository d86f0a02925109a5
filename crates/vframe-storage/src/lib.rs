//! S3 storage client.
//!
//! This crate provides:
//! - Presigned GET URL generation
//! - Object existence checks (HEAD)
//! - Byte uploads with content type and user metadata
//! - The [`ObjectStore`] seam used by the extraction workflow

pub mod client;
pub mod error;
pub mod store;

pub use client::{S3Client, S3Config};
pub use error::{StorageError, StorageResult};
pub use store::{ObjectMetadata, ObjectStore};
