//! S3 client implementation.

use std::collections::HashMap;
use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Configuration for the S3 client.
///
/// Every field is optional: with nothing set the standard AWS provider chain
/// (environment, profile, instance role) is used. An endpoint plus static
/// credentials targets S3-compatible stores such as MinIO or R2.
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    /// Custom S3 API endpoint
    pub endpoint_url: Option<String>,
    /// Region override
    pub region: Option<String>,
    /// Static access key ID
    pub access_key_id: Option<String>,
    /// Static secret access key
    pub secret_access_key: Option<String>,
    /// Use `endpoint/bucket/key` addressing instead of virtual hosts
    pub force_path_style: bool,
}

impl S3Config {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> StorageResult<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let access_key_id = var("S3_ACCESS_KEY_ID");
        let secret_access_key = var("S3_SECRET_ACCESS_KEY");
        if access_key_id.is_some() != secret_access_key.is_some() {
            return Err(StorageError::config_error(
                "S3_ACCESS_KEY_ID and S3_SECRET_ACCESS_KEY must be set together",
            ));
        }

        Ok(Self {
            endpoint_url: var("S3_ENDPOINT_URL"),
            region: var("S3_REGION"),
            access_key_id,
            secret_access_key,
            force_path_style: var("S3_FORCE_PATH_STYLE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

/// S3 storage client.
///
/// Cheap to clone; one instance is built per process and shared by every
/// invocation.
#[derive(Clone)]
pub struct S3Client {
    client: Client,
}

impl S3Client {
    /// Create a new S3 client from configuration.
    pub async fn new(config: S3Config) -> StorageResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let shared_config = loader.load().await;

        let mut builder = Builder::from(&shared_config).force_path_style(config.force_path_style);

        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials =
                Credentials::new(access_key_id, secret_access_key, None, None, "vframe-static");
            builder = builder.credentials_provider(credentials);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> StorageResult<Self> {
        let config = S3Config::from_env()?;
        Self::new(config).await
    }

    /// Generate a presigned URL for GET (temporary, signed URL via S3 API).
    pub async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presign_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::presign_failed(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| StorageError::presign_failed(DisplayErrorContext(&e).to_string()))?;

        debug!(bucket, key, "Presigned GET URL issued");
        Ok(presigned.uri().to_string())
    }

    /// Check if an object exists (HEAD, metadata only).
    ///
    /// Without `s3:ListBucket` S3 answers a HEAD on a missing key with 403
    /// instead of 404, so both count as absent.
    pub async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = e.as_service_error().is_some_and(|se| se.is_not_found());
                let status = e.raw_response().map(|r| r.status().as_u16());
                if not_found || status.is_some_and(is_absent_status) {
                    debug!(bucket, key, ?status, "Object not found");
                    Ok(false)
                } else {
                    Err(StorageError::AwsSdk(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }

    /// Upload bytes with a content type and user metadata.
    pub async fn upload_bytes(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()> {
        let size = data.len();
        debug!("Uploading {} bytes to s3://{}/{}", size, bucket, key);

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .set_metadata(Some(metadata))
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(DisplayErrorContext(&e).to_string()))?;

        info!("Uploaded {} bytes to s3://{}/{}", size, bucket, key);
        Ok(())
    }
}

/// HEAD statuses S3 uses for a key the caller cannot see.
fn is_absent_status(status: u16) -> bool {
    matches!(status, 403 | 404)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = S3Config::from_vars(vars(&[])).unwrap();
        assert!(config.endpoint_url.is_none());
        assert!(config.region.is_none());
        assert!(config.access_key_id.is_none());
        assert!(!config.force_path_style);
    }

    #[test]
    fn test_config_custom_endpoint() {
        let config = S3Config::from_vars(vars(&[
            ("S3_ENDPOINT_URL", "http://localhost:9000"),
            ("S3_REGION", "us-east-1"),
            ("S3_ACCESS_KEY_ID", "minio"),
            ("S3_SECRET_ACCESS_KEY", "minio123"),
            ("S3_FORCE_PATH_STYLE", "true"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.access_key_id.as_deref(), Some("minio"));
        assert!(config.force_path_style);
    }

    #[test]
    fn test_config_requires_both_keys() {
        let err = S3Config::from_vars(vars(&[("S3_ACCESS_KEY_ID", "minio")])).unwrap_err();
        assert!(matches!(err, StorageError::ConfigError(_)));
    }

    #[test]
    fn test_absent_statuses() {
        assert!(is_absent_status(404));
        assert!(is_absent_status(403));
        assert!(!is_absent_status(500));
        assert!(!is_absent_status(400));
    }

    #[tokio::test]
    async fn test_presign_get_offline() {
        let client = S3Client::new(S3Config {
            endpoint_url: Some("http://localhost:9000".to_string()),
            region: Some("us-east-1".to_string()),
            access_key_id: Some("minio".to_string()),
            secret_access_key: Some("minio123".to_string()),
            force_path_style: true,
        })
        .await
        .unwrap();

        let url = client
            .presign_get("b", "uploads/v.mp4", Duration::from_secs(3600))
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:9000/b/uploads/v.mp4?"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
    }
}
