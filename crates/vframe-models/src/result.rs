//! Extraction result model.

use serde::{Deserialize, Serialize};

/// Outcome of one frame extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// `s3://` URI of the source video
    pub origin_video: String,
    /// `s3://` URI of the uploaded JPEG
    pub image: String,
    /// Container duration in seconds
    pub duration: f64,
    /// Caller-supplied identifier, echoed back (`null` when absent)
    #[serde(default)]
    pub request_id: Option<String>,
}

impl ExtractionResult {
    /// Attach the caller's request identifier.
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_null_request_id() {
        let result = ExtractionResult {
            origin_video: "s3://b/v.mp4".to_string(),
            image: "s3://b/video-handler-output/v.mp4.jpg".to_string(),
            duration: 12.34,
            request_id: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "originVideo": "s3://b/v.mp4",
                "image": "s3://b/video-handler-output/v.mp4.jpg",
                "duration": 12.34,
                "requestId": null
            })
        );
    }

    #[test]
    fn test_with_request_id() {
        let result = ExtractionResult {
            origin_video: "s3://b/v.mp4".to_string(),
            image: "s3://b/out/v.mp4.jpg".to_string(),
            duration: 1.0,
            request_id: None,
        }
        .with_request_id(Some("req-42".to_string()));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["requestId"], "req-42");
    }
}
