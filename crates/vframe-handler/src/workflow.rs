//! Frame extraction workflow.
//!
//! presign → probe → extract → upload, strictly in that order. Any failure
//! stops the run; nothing is uploaded unless both the probe and the
//! extraction succeeded. No step is retried.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use vframe_media::FrameGrabber;
use vframe_models::{
    format_duration, ExtractionRequest, ExtractionResult, DURATION_METADATA_KEY,
    JPEG_CONTENT_TYPE, PRESIGN_EXPIRY_SECS,
};
use vframe_storage::{ObjectMetadata, ObjectStore};

use crate::error::HandlerResult;
use crate::metrics::{self, steps};

/// Runs one extraction against a store and a set of media tools.
#[derive(Clone)]
pub struct ExtractionWorkflow {
    store: Arc<dyn ObjectStore>,
    media: Arc<dyn FrameGrabber>,
    presign_expiry: Duration,
}

impl ExtractionWorkflow {
    pub fn new(store: Arc<dyn ObjectStore>, media: Arc<dyn FrameGrabber>) -> Self {
        Self {
            store,
            media,
            presign_expiry: Duration::from_secs(PRESIGN_EXPIRY_SECS),
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Extract one frame and the duration of `request`'s source video.
    pub async fn extract(&self, request: &ExtractionRequest) -> HandlerResult<ExtractionResult> {
        let source_uri = request.source_uri();

        let started = Instant::now();
        let url = self
            .store
            .presign_get(&request.source_bucket, &request.source_key, self.presign_expiry)
            .await?;
        metrics::record_step(steps::PRESIGN, started.elapsed());

        let started = Instant::now();
        let duration = self.media.probe_duration(&url).await?;
        metrics::record_step(steps::PROBE, started.elapsed());
        info!(source = %source_uri, duration, "Video duration: {} seconds", duration);

        let started = Instant::now();
        let frame = self.media.grab_frame(&url, &request.time_offset).await?;
        metrics::record_step(steps::EXTRACT, started.elapsed());
        metrics::record_frame_bytes(frame.len());
        debug!(
            source = %source_uri,
            time_offset = %request.time_offset,
            bytes = frame.len(),
            "Frame captured"
        );

        let key = request.destination_key();
        let mut metadata = ObjectMetadata::new();
        metadata.insert(DURATION_METADATA_KEY.to_string(), format_duration(duration));

        let started = Instant::now();
        self.store
            .put_object(
                &request.destination_bucket,
                &key,
                frame,
                JPEG_CONTENT_TYPE,
                metadata,
            )
            .await?;
        metrics::record_step(steps::UPLOAD, started.elapsed());

        let image = request.destination_uri();
        info!(source = %source_uri, "First frame image saved to: {}", image);

        Ok(ExtractionResult {
            origin_video: source_uri,
            image,
            duration,
            request_id: None,
        })
    }
}
