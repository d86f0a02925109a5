//! Handler configuration.

use vframe_models::DEFAULT_OUTPUT_PATH;

/// Handler configuration.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Destination bucket for event-triggered frames (defaults to the source bucket)
    pub output_bucket: Option<String>,
    /// Destination prefix for event-triggered frames
    pub output_path: String,
    /// Max request body size
    pub max_body_size: usize,
    /// Serve Prometheus metrics at /metrics
    pub metrics_enabled: bool,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            output_bucket: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            max_body_size: 1024 * 1024, // 1MB
            metrics_enabled: true,
            environment: "development".to_string(),
        }
    }
}

impl HandlerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            host: var("API_HOST").unwrap_or(defaults.host),
            port: var("API_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            output_bucket: var("OUTPUT_BUCKET"),
            output_path: var("OUTPUT_PATH").unwrap_or(defaults.output_path),
            max_body_size: var("MAX_BODY_SIZE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            metrics_enabled: var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.metrics_enabled),
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    /// Destination bucket for an event on `source_bucket`.
    pub fn event_output_bucket<'a>(&'a self, source_bucket: &'a str) -> &'a str {
        self.output_bucket.as_deref().unwrap_or(source_bucket)
    }
}
