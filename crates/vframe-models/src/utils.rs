//! Small helpers for object keys and URIs.

/// Final path segment of an object key.
///
/// `videos/2024/clip.mp4` becomes `clip.mp4`; a key ending in `/` yields an
/// empty string.
pub fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Render an `s3://bucket/key` URI.
pub fn s3_uri(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket, key)
}

/// Render a duration for object metadata.
///
/// Uses the shortest round-trip representation and always keeps a fractional
/// part, so `12.34` is `"12.34"` and `12.0` is `"12.0"`.
pub fn format_duration(seconds: f64) -> String {
    format!("{:?}", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename() {
        assert_eq!(basename("v.mp4"), "v.mp4");
        assert_eq!(basename("uploads/2024/v.mp4"), "v.mp4");
        assert_eq!(basename("uploads/"), "");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn test_s3_uri() {
        assert_eq!(s3_uri("b", "v.mp4"), "s3://b/v.mp4");
        assert_eq!(
            s3_uri("media", "video-handler-output/v.mp4.jpg"),
            "s3://media/video-handler-output/v.mp4.jpg"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(12.34), "12.34");
        assert_eq!(format_duration(12.0), "12.0");
        assert_eq!(format_duration(0.5), "0.5");
        assert_eq!(format_duration(3600.041), "3600.041");
    }
}
