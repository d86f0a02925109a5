//! FFprobe duration query.

use std::path::Path;

use tracing::debug;

use crate::command::{capture_stdout, check_ffprobe};
use crate::error::{MediaError, MediaResult};

/// Builder for the ffprobe invocation that prints a container duration.
#[derive(Debug, Clone)]
pub struct FfprobeCommand {
    input: String,
    stream: String,
}

impl FfprobeCommand {
    /// Query the duration of `input`, selecting the first video stream.
    pub fn duration(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            stream: "v:0".to_string(),
        }
    }

    /// Build the command arguments.
    ///
    /// Prints the bare `format=duration` value, one line, no key and no
    /// section wrappers.
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-select_streams".to_string(),
            self.stream.clone(),
            "-show_entries".to_string(),
            "format=duration".to_string(),
            "-of".to_string(),
            "default=noprint_wrappers=1:nokey=1".to_string(),
            self.input.clone(),
        ]
    }
}

/// Probe the container duration of `input` in seconds.
pub async fn probe_duration(
    ffprobe: impl AsRef<Path>,
    input: &str,
    timeout_secs: Option<u64>,
) -> MediaResult<f64> {
    let ffprobe = check_ffprobe(ffprobe)?;
    let args = FfprobeCommand::duration(input).build_args();

    let output = capture_stdout(&ffprobe, &args, timeout_secs).await?;
    debug!(status = ?output.status.code(), "FFprobe finished");

    // Exit status is not consulted; only the printed value counts.
    parse_duration(&output.stdout)
}

/// Parse ffprobe's single-line duration output.
///
/// Empty, non-numeric (`N/A`) and non-finite values are rejected.
pub fn parse_duration(stdout: &[u8]) -> MediaResult<f64> {
    let text = String::from_utf8_lossy(stdout);
    let line = text.trim();

    if line.is_empty() {
        return Err(MediaError::probe_failed("FFprobe returned no duration", line));
    }

    match line.parse::<f64>() {
        Ok(duration) if duration.is_finite() => Ok(duration),
        _ => Err(MediaError::probe_failed(
            format!("Unparseable duration: {:?}", line),
            line,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert!((parse_duration(b"12.340000\n").unwrap() - 12.34).abs() < 1e-9);
        assert!((parse_duration(b"  7\r\n").unwrap() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        let outputs: [&[u8]; 6] = [b"", b"\n", b"N/A\n", b"duration=12.3", b"nan", b"inf"];
        for output in outputs {
            let err = parse_duration(output).unwrap_err();
            assert!(err.is_probe_failure(), "accepted {:?}", output);
        }
    }

    #[test]
    fn test_probe_args() {
        let url = "https://b.s3.amazonaws.com/v.mp4?X-Amz-Expires=3600&X-Amz-Signature=abc";
        let args = FfprobeCommand::duration(url).build_args();

        assert_eq!(args[0..2], ["-v", "error"]);
        assert!(args.windows(2).any(|w| w == ["-select_streams", "v:0"]));
        assert!(args.windows(2).any(|w| w == ["-show_entries", "format=duration"]));
        assert_eq!(args.last().map(String::as_str), Some(url));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_non_numeric_output() {
        // `echo` answers with its own argv, which is not a number.
        let err = probe_duration("echo", "v.mp4", None).await.unwrap_err();
        assert!(matches!(err, MediaError::ProbeFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_empty_output() {
        let err = probe_duration("true", "v.mp4", None).await.unwrap_err();
        assert!(matches!(err, MediaError::ProbeFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_binary_not_executable() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("ffprobe");
        std::fs::write(&fake, b"not a program").unwrap();

        let err = tokio_test::block_on(probe_duration(&fake, "v.mp4", None)).unwrap_err();
        assert!(matches!(err, MediaError::FfprobeNotFound(_)));
    }
}
