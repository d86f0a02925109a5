//! Application state.

use std::sync::Arc;

use tracing::warn;

use vframe_media::{FrameGrabber, MediaTools};
use vframe_storage::{ObjectStore, S3Client};

use crate::config::HandlerConfig;
use crate::error::HandlerResult;
use crate::workflow::ExtractionWorkflow;

/// Shared application state.
///
/// Built once per process; the storage client inside is reused by every
/// invocation.
#[derive(Clone)]
pub struct AppState {
    pub config: HandlerConfig,
    pub workflow: ExtractionWorkflow,
}

impl AppState {
    /// Assemble state from explicit collaborators.
    pub fn new(
        config: HandlerConfig,
        store: Arc<dyn ObjectStore>,
        media: Arc<dyn FrameGrabber>,
    ) -> Self {
        Self {
            config,
            workflow: ExtractionWorkflow::new(store, media),
        }
    }

    /// Create state backed by S3 and the configured ffmpeg/ffprobe binaries.
    pub async fn from_env(config: HandlerConfig) -> HandlerResult<Self> {
        let storage = S3Client::from_env().await?;

        let media = MediaTools::from_env();
        if let Err(e) = media.verify() {
            warn!("Media tools unavailable, extractions will fail: {}", e);
        }

        Ok(Self::new(config, Arc::new(storage), Arc::new(media)))
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        self.workflow.store()
    }
}
