//! Constants shared by the workflow and both entry points.

/// Output prefix used when neither the caller nor the environment names one.
pub const DEFAULT_OUTPUT_PATH: &str = "video-handler-output";

/// Seek position used when no time offset is given.
pub const DEFAULT_TIME_OFFSET: &str = "00:00:00";

/// `detail-type` of the only event the event adapter acts on.
pub const OBJECT_CREATED: &str = "Object Created";

/// Validity window of the presigned source URL, in seconds.
pub const PRESIGN_EXPIRY_SECS: u64 = 3600;

/// Content type of the uploaded frame.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Object metadata key carrying the probed duration.
pub const DURATION_METADATA_KEY: &str = "duration";
