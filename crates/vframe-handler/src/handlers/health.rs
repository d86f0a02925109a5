//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

const SERVICE: &str = "vframe-api";

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub output_path: String,
    pub checked_at: DateTime<Utc>,
}

/// Report the running build and its output settings.
///
/// Storage and media tools are not contacted.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        output_path: state.config.output_path.clone(),
        checked_at: Utc::now(),
    })
}
