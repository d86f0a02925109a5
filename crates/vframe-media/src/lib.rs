//! FFmpeg CLI wrapper for frame extraction.
//!
//! This crate provides:
//! - Type-safe FFmpeg/FFprobe argument building (no shell involved)
//! - Container duration probing
//! - Single-frame JPEG capture to memory
//! - The [`FrameGrabber`] seam used by the extraction workflow

pub mod command;
pub mod error;
pub mod frame;
pub mod probe;
pub mod tools;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use frame::{frame_command, grab_frame};
pub use probe::{parse_duration, probe_duration, FfprobeCommand};
pub use tools::{FrameGrabber, MediaTools, MediaToolsConfig};
