//! Tracing setup and structured invocation logging.

use tracing::{error, info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Colored, human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`, falling back to `default` when unset.
    pub fn from_env_or(default: LogFormat) -> Self {
        match std::env::var("LOG_FORMAT").map(|v| v.to_lowercase()) {
            Ok(v) if v == "json" => LogFormat::Json,
            Ok(v) if v == "text" => LogFormat::Text,
            _ => default,
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` is honoured; `vframe=info` is always added.
pub fn init_tracing(format: LogFormat) {
    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "vframe=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(env_filter)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_ansi(true)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .with(env_filter)
                .init();
        }
    }
}

/// Logger for one handler invocation.
///
/// Every line carries the invocation id and the entry point that produced it.
#[derive(Debug, Clone)]
pub struct InvocationLogger {
    invocation_id: String,
    entry: String,
}

impl InvocationLogger {
    /// Create a logger; a random id is generated when none is supplied.
    ///
    /// # Arguments
    /// * `invocation_id` - Caller-supplied request id, if any
    /// * `entry` - Entry point name (e.g. "event", "request")
    pub fn new(invocation_id: Option<&str>, entry: &str) -> Self {
        Self {
            invocation_id: invocation_id
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            entry: entry.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            invocation_id = %self.invocation_id,
            entry = %self.entry,
            "Invocation started: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            invocation_id = %self.invocation_id,
            entry = %self.entry,
            "Invocation warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            invocation_id = %self.invocation_id,
            entry = %self.entry,
            "Invocation error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            invocation_id = %self.invocation_id,
            entry = %self.entry,
            "Invocation completed: {}", message
        );
    }

    /// Span for the workflow run of this invocation.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "invocation",
            invocation_id = %self.invocation_id,
            entry = %self.entry
        )
    }
}
