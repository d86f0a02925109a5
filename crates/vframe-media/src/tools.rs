//! Configured ffprobe/ffmpeg pair behind the [`FrameGrabber`] seam.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::command::{check_ffmpeg, check_ffprobe};
use crate::error::MediaResult;
use crate::{frame, probe};

/// Media inspection used by the extraction workflow.
#[async_trait]
pub trait FrameGrabber: Send + Sync {
    /// Container duration of the video at `url`, in seconds.
    async fn probe_duration(&self, url: &str) -> MediaResult<f64>;

    /// One JPEG frame of the video at `url`, captured at `time_offset`.
    async fn grab_frame(&self, url: &str, time_offset: &str) -> MediaResult<Vec<u8>>;
}

/// Locations of the media binaries.
#[derive(Debug, Clone)]
pub struct MediaToolsConfig {
    /// FFmpeg executable
    pub ffmpeg_path: PathBuf,
    /// FFprobe executable
    pub ffprobe_path: PathBuf,
    /// Per-process timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for MediaToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            timeout_secs: None,
        }
    }
}

impl MediaToolsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            ffmpeg_path: std::env::var("FFMPEG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ffmpeg")),
            ffprobe_path: std::env::var("FFPROBE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ffprobe")),
            timeout_secs: std::env::var("FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0),
        }
    }
}

/// [`FrameGrabber`] backed by the ffprobe and ffmpeg executables.
#[derive(Debug, Clone, Default)]
pub struct MediaTools {
    config: MediaToolsConfig,
}

impl MediaTools {
    pub fn new(config: MediaToolsConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(MediaToolsConfig::from_env())
    }

    /// Resolve both executables, failing if either is missing.
    pub fn verify(&self) -> MediaResult<()> {
        let ffprobe = check_ffprobe(&self.config.ffprobe_path)?;
        let ffmpeg = check_ffmpeg(&self.config.ffmpeg_path)?;
        info!(
            ffprobe = %ffprobe.display(),
            ffmpeg = %ffmpeg.display(),
            "Media tools available"
        );
        Ok(())
    }
}

#[async_trait]
impl FrameGrabber for MediaTools {
    async fn probe_duration(&self, url: &str) -> MediaResult<f64> {
        probe::probe_duration(&self.config.ffprobe_path, url, self.config.timeout_secs).await
    }

    async fn grab_frame(&self, url: &str, time_offset: &str) -> MediaResult<Vec<u8>> {
        frame::grab_frame(
            &self.config.ffmpeg_path,
            url,
            time_offset,
            self.config.timeout_secs,
        )
        .await
    }
}
