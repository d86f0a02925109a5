//! Extraction request models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_TIME_OFFSET};
use crate::utils::{basename, s3_uri};

/// A fully resolved frame extraction: where the video is, where the frame goes
/// and which position to capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Bucket holding the source video
    pub source_bucket: String,
    /// Key of the source video
    pub source_key: String,
    /// Bucket receiving the JPEG frame
    pub destination_bucket: String,
    /// Key prefix for the JPEG frame
    pub destination_path: String,
    /// Seek position, `HH:MM:SS`, passed to ffmpeg verbatim
    pub time_offset: String,
}

impl ExtractionRequest {
    /// Create a request that writes next to the source, under the default
    /// output path, at offset zero.
    pub fn new(source_bucket: impl Into<String>, source_key: impl Into<String>) -> Self {
        let source_bucket = source_bucket.into();
        Self {
            destination_bucket: source_bucket.clone(),
            source_bucket,
            source_key: source_key.into(),
            destination_path: DEFAULT_OUTPUT_PATH.to_string(),
            time_offset: DEFAULT_TIME_OFFSET.to_string(),
        }
    }

    /// Set the destination bucket and key prefix.
    pub fn with_destination(
        mut self,
        bucket: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.destination_bucket = bucket.into();
        self.destination_path = path.into();
        self
    }

    /// Set the seek position.
    pub fn with_time_offset(mut self, time_offset: impl Into<String>) -> Self {
        self.time_offset = time_offset.into();
        self
    }

    /// Key the frame is written to: `{destination_path}/{basename(source_key)}.jpg`.
    ///
    /// Two sources sharing a basename map to the same key; the later upload
    /// overwrites the earlier one.
    pub fn destination_key(&self) -> String {
        format!(
            "{}/{}.jpg",
            self.destination_path,
            basename(&self.source_key)
        )
    }

    /// `s3://` URI of the source video.
    pub fn source_uri(&self) -> String {
        s3_uri(&self.source_bucket, &self.source_key)
    }

    /// `s3://` URI of the frame.
    pub fn destination_uri(&self) -> String {
        s3_uri(&self.destination_bucket, &self.destination_key())
    }
}

/// A required request field was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required field: {0}")]
pub struct MissingField(pub &'static str);

/// Body of a synchronous extraction request.
///
/// Every field is optional at the parse level so that validation can name the
/// one that is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRequest {
    pub bucket_name: Option<String>,
    pub key: Option<String>,
    pub time_off: Option<String>,
    pub out_bucket_name: Option<String>,
    pub out_path: Option<String>,
    pub request_id: Option<String>,
}

impl FrameRequest {
    /// Validate required fields and apply defaults.
    ///
    /// `outBucketName` falls back to the source bucket, `outPath` to
    /// [`DEFAULT_OUTPUT_PATH`] and `timeOff` to [`DEFAULT_TIME_OFFSET`].
    pub fn into_extraction_request(self) -> Result<ExtractionRequest, MissingField> {
        let bucket = non_empty(self.bucket_name).ok_or(MissingField("bucketName"))?;
        let key = non_empty(self.key).ok_or(MissingField("key"))?;

        let out_bucket = non_empty(self.out_bucket_name).unwrap_or_else(|| bucket.clone());
        let out_path =
            non_empty(self.out_path).unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());
        let time_offset =
            non_empty(self.time_off).unwrap_or_else(|| DEFAULT_TIME_OFFSET.to_string());

        Ok(ExtractionRequest::new(bucket, key)
            .with_destination(out_bucket, out_path)
            .with_time_offset(time_offset))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_key() {
        let request = ExtractionRequest::new("b", "uploads/2024/v.mp4");
        assert_eq!(request.destination_key(), "video-handler-output/v.mp4.jpg");
        assert_eq!(request.source_uri(), "s3://b/uploads/2024/v.mp4");
        assert_eq!(request.destination_uri(), "s3://b/video-handler-output/v.mp4.jpg");
    }

    #[test]
    fn test_destination_key_is_deterministic() {
        let a = ExtractionRequest::new("b", "v.mp4").with_destination("out", "frames");
        let b = ExtractionRequest::new("b", "v.mp4").with_destination("out", "frames");
        assert_eq!(a.destination_key(), b.destination_key());
        assert_eq!(a.destination_key(), "frames/v.mp4.jpg");
    }

    #[test]
    fn test_destination_path_joined_verbatim() {
        let request = ExtractionRequest::new("b", "v.mp4").with_destination("b", "frames/");
        assert_eq!(request.destination_key(), "frames//v.mp4.jpg");

        let root = ExtractionRequest::new("b", "v.mp4").with_destination("b", "/");
        assert_eq!(root.destination_key(), "//v.mp4.jpg");
    }

    #[test]
    fn test_shared_basename_collides() {
        let a = ExtractionRequest::new("b", "cam1/v.mp4");
        let b = ExtractionRequest::new("b", "cam2/v.mp4");
        assert_eq!(a.destination_key(), b.destination_key());
    }

    #[test]
    fn test_frame_request_defaults() {
        let body: FrameRequest =
            serde_json::from_str(r#"{"bucketName":"b","key":"v.mp4"}"#).unwrap();
        let request = body.into_extraction_request().unwrap();

        assert_eq!(request.source_bucket, "b");
        assert_eq!(request.destination_bucket, "b");
        assert_eq!(request.destination_path, DEFAULT_OUTPUT_PATH);
        assert_eq!(request.time_offset, DEFAULT_TIME_OFFSET);
    }

    #[test]
    fn test_frame_request_overrides() {
        let body: FrameRequest = serde_json::from_str(
            r#"{"bucketName":"b","key":"v.mp4","timeOff":"00:01:30",
                "outBucketName":"thumbs","outPath":"stills","requestId":"r-1"}"#,
        )
        .unwrap();
        assert_eq!(body.request_id.as_deref(), Some("r-1"));

        let request = body.into_extraction_request().unwrap();
        assert_eq!(request.destination_bucket, "thumbs");
        assert_eq!(request.destination_key(), "stills/v.mp4.jpg");
        assert_eq!(request.time_offset, "00:01:30");
    }

    #[test]
    fn test_frame_request_missing_fields() {
        let missing_bucket = FrameRequest {
            key: Some("v.mp4".into()),
            ..Default::default()
        };
        assert_eq!(
            missing_bucket.into_extraction_request(),
            Err(MissingField("bucketName"))
        );

        let missing_key = FrameRequest {
            bucket_name: Some("b".into()),
            key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(missing_key.into_extraction_request(), Err(MissingField("key")));
    }
}
