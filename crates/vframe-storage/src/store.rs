//! Abstraction over the object store (e.g. S3).
//!
//! The extraction workflow only needs three operations; [`S3Client`]
//! implements them against the real service and tests substitute an
//! in-memory store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::client::S3Client;
use crate::error::StorageResult;

/// User metadata attached to an uploaded object.
pub type ObjectMetadata = HashMap<String, String>;

/// Storage operations used by the extraction workflow.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Issue a time-limited, authenticated read URL for `bucket/key`.
    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration)
        -> StorageResult<String>;

    /// Whether `bucket/key` exists (metadata lookup only).
    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Upload `data` to `bucket/key`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: ObjectMetadata,
    ) -> StorageResult<()>;
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        S3Client::presign_get(self, bucket, key, expires_in).await
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        S3Client::exists(self, bucket, key).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: ObjectMetadata,
    ) -> StorageResult<()> {
        self.upload_bytes(bucket, key, data, content_type, metadata)
            .await
    }
}
