//! Shared fakes for handler integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use vframe_handler::{AppState, HandlerConfig};
use vframe_media::{parse_duration, FrameGrabber, MediaError, MediaResult};
use vframe_storage::{ObjectMetadata, ObjectStore, StorageResult};

/// One recorded `put_object` call.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bucket: String,
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: String,
    pub metadata: ObjectMetadata,
}

/// In-memory object store.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashSet<(String, String)>>,
    uploads: Mutex<Vec<Upload>>,
    presigns: AtomicUsize,
    presign_expiries: Mutex<Vec<Duration>>,
    exists_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn with_object(bucket: &str, key: &str) -> Self {
        let store = Self::default();
        store.add_object(bucket, key);
        store
    }

    pub fn add_object(&self, bucket: &str, key: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()));
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn presign_count(&self) -> usize {
        self.presigns.load(Ordering::SeqCst)
    }

    /// Expiry windows requested for presigned URLs, in call order.
    pub fn presign_expiries(&self) -> Vec<Duration> {
        self.presign_expiries.lock().unwrap().clone()
    }

    pub fn exists_count(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    /// Total number of storage operations performed.
    pub fn op_count(&self) -> usize {
        self.presign_count() + self.exists_count() + self.uploads().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.presigns.fetch_add(1, Ordering::SeqCst);
        self.presign_expiries.lock().unwrap().push(expires_in);
        Ok(format!(
            "https://{}.s3.local/{}?X-Amz-Expires={}",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains(&(bucket.to_string(), key.to_string())))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: ObjectMetadata,
    ) -> StorageResult<()> {
        self.add_object(bucket, key);
        self.uploads.lock().unwrap().push(Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            data,
            content_type: content_type.to_string(),
            metadata,
        });
        Ok(())
    }
}

/// Media tools returning canned probe output and frame bytes.
pub struct FakeMedia {
    probe_output: String,
    frame: Vec<u8>,
    probes: AtomicUsize,
    grabs: AtomicUsize,
    offsets: Mutex<Vec<String>>,
}

impl FakeMedia {
    pub fn new(probe_output: &str, frame: &[u8]) -> Self {
        Self {
            probe_output: probe_output.to_string(),
            frame: frame.to_vec(),
            probes: AtomicUsize::new(0),
            grabs: AtomicUsize::new(0),
            offsets: Mutex::new(Vec::new()),
        }
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn grab_count(&self) -> usize {
        self.grabs.load(Ordering::SeqCst)
    }

    pub fn offsets(&self) -> Vec<String> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl FrameGrabber for FakeMedia {
    async fn probe_duration(&self, _url: &str) -> MediaResult<f64> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        parse_duration(self.probe_output.as_bytes())
    }

    async fn grab_frame(&self, _url: &str, time_offset: &str) -> MediaResult<Vec<u8>> {
        self.grabs.fetch_add(1, Ordering::SeqCst);
        self.offsets.lock().unwrap().push(time_offset.to_string());
        if self.frame.is_empty() {
            return Err(MediaError::extraction_failed("ffmpeg produced no output", Some(0)));
        }
        Ok(self.frame.clone())
    }
}

/// A small JPEG-looking payload.
pub const FRAME: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0xFF, 0xD9];

pub fn test_state(
    config: HandlerConfig,
    store: Arc<MemoryStore>,
    media: Arc<FakeMedia>,
) -> AppState {
    AppState::new(config, store, media)
}

pub fn object_created(bucket: &str, key: &str) -> serde_json::Value {
    serde_json::json!({
        "version": "0",
        "source": "aws.s3",
        "detail-type": "Object Created",
        "detail": {
            "bucket": { "name": bucket },
            "object": { "key": key, "size": 1024 }
        }
    })
}
