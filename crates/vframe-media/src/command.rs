//! FFmpeg command builder and runner.
//!
//! Commands are always spawned from an explicit argument vector. Inputs such
//! as presigned URLs travel as a single argv entry no matter which characters
//! they contain.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Output target meaning "write to stdout".
pub const STDOUT: &str = "-";

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input path or URL
    input: String,
    /// Input arguments (before -i)
    input_args: Vec<String>,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command writing to stdout.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            log_level: "error".to_string(),
        }
    }

    /// Add input arguments (before -i).
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add output arguments (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Seek to a position given as an ffmpeg time string (`HH:MM:SS`).
    ///
    /// The value is not validated; ffmpeg rejects malformed positions itself.
    pub fn seek_to(self, position: impl Into<String>) -> Self {
        self.input_arg("-ss").input_arg(position)
    }

    /// Extract single frame.
    pub fn single_frame(self) -> Self {
        self.output_arg("-vframes").output_arg("1")
    }

    /// Set output container format.
    pub fn format(self, format: impl Into<String>) -> Self {
        self.output_arg("-f").output_arg(format)
    }

    /// Set video codec.
    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec!["-loglevel".to_string(), self.log_level.clone()];

        args.extend(self.input_args.iter().cloned());

        args.push("-i".to_string());
        args.push(self.input.clone());

        args.extend(self.output_args.iter().cloned());

        args.push(STDOUT.to_string());

        args
    }
}

/// Runner that executes an [`FfmpegCommand`] and captures its stdout.
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    /// FFmpeg executable (name on PATH or absolute path)
    binary: PathBuf,
    /// Timeout in seconds
    timeout_secs: Option<u64>,
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegRunner {
    /// Create a new runner for the given executable.
    pub fn new(binary: impl AsRef<Path>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
            timeout_secs: None,
        }
    }

    /// Set timeout.
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Run the command and return everything it wrote to stdout.
    ///
    /// A non-zero exit status is reported as [`MediaError::ExtractionFailed`].
    pub async fn capture(&self, cmd: &FfmpegCommand) -> MediaResult<Vec<u8>> {
        let binary = check_ffmpeg(&self.binary)?;
        let args = cmd.build_args();

        let output = capture_stdout(&binary, &args, self.timeout_secs).await?;

        if !output.status.success() {
            return Err(MediaError::extraction_failed(
                "FFmpeg exited with non-zero status",
                output.status.code(),
            ));
        }

        Ok(output.stdout)
    }
}

/// Spawn `binary` with `args`, discard stderr and collect stdout.
///
/// With a timeout the child is killed once it elapses.
pub(crate) async fn capture_stdout(
    binary: &Path,
    args: &[String],
    timeout_secs: Option<u64>,
) -> MediaResult<Output> {
    debug!(binary = %binary.display(), args = ?args, "Spawning process");

    let child = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    let output = match timeout_secs {
        Some(secs) => {
            match tokio::time::timeout(Duration::from_secs(secs), child.wait_with_output()).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(
                        binary = %binary.display(),
                        "Process timed out after {} seconds, killing it", secs
                    );
                    return Err(MediaError::Timeout(secs));
                }
            }
        }
        None => child.wait_with_output().await?,
    };

    Ok(output)
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg(binary: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let binary = binary.as_ref();
    which::which(binary).map_err(|_| MediaError::FfmpegNotFound(binary.to_path_buf()))
}

/// Check if FFprobe is available.
pub fn check_ffprobe(binary: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let binary = binary.as_ref();
    which::which(binary).map_err(|_| MediaError::FfprobeNotFound(binary.to_path_buf()))
}
