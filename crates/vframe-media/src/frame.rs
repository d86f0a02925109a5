//! Single-frame JPEG capture.

use std::path::Path;

use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Build the ffmpeg command that writes one MJPEG frame at `time_offset` to stdout.
pub fn frame_command(input: &str, time_offset: &str) -> FfmpegCommand {
    FfmpegCommand::new(input)
        .log_level("quiet")
        .seek_to(time_offset)
        .single_frame()
        .format("image2")
        .video_codec("mjpeg")
}

/// Capture one JPEG frame from `input` at `time_offset` (`HH:MM:SS`).
///
/// Fails with [`MediaError::ExtractionFailed`] when ffmpeg writes nothing.
/// A non-zero exit fails as well even if some bytes were written, so a
/// truncated frame is never returned.
pub async fn grab_frame(
    ffmpeg: impl AsRef<Path>,
    input: &str,
    time_offset: &str,
    timeout_secs: Option<u64>,
) -> MediaResult<Vec<u8>> {
    let cmd = frame_command(input, time_offset);

    let bytes = FfmpegRunner::new(ffmpeg)
        .with_timeout(timeout_secs)
        .capture(&cmd)
        .await?;

    if bytes.is_empty() {
        return Err(MediaError::extraction_failed(
            format!("No frame produced at offset {}", time_offset),
            Some(0),
        ));
    }

    debug!(bytes = bytes.len(), time_offset, "Captured frame");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_command_args() {
        let args = frame_command("https://host/v.mp4?sig=1", "00:00:05").build_args();
        assert_eq!(
            args,
            vec![
                "-loglevel",
                "quiet",
                "-ss",
                "00:00:05",
                "-i",
                "https://host/v.mp4?sig=1",
                "-vframes",
                "1",
                "-f",
                "image2",
                "-c:v",
                "mjpeg",
                "-",
            ]
        );
    }

    #[test]
    fn test_offset_passed_verbatim() {
        let args = frame_command("v.mp4", "not-a-time").build_args();
        assert!(args.windows(2).any(|w| w == ["-ss", "not-a-time"]));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let err = grab_frame("true", "v.mp4", "00:00:00", None).await.unwrap_err();
        assert!(matches!(err, MediaError::ExtractionFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let err = grab_frame("false", "v.mp4", "00:00:00", None).await.unwrap_err();
        assert!(matches!(
            err,
            MediaError::ExtractionFailed { exit_code: Some(1), .. }
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_empty_output() {
        let bytes = grab_frame("echo", "v.mp4", "00:00:00", None).await.unwrap();
        assert!(!bytes.is_empty());
    }
}
