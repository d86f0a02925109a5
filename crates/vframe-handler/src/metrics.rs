//! Prometheus metrics for the handler.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vframe_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vframe_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vframe_http_requests_in_flight";

    // Workflow metrics
    pub const EXTRACTIONS_TOTAL: &str = "vframe_extractions_total";
    pub const EXTRACTION_FAILURES_TOTAL: &str = "vframe_extraction_failures_total";
    pub const EVENTS_IGNORED_TOTAL: &str = "vframe_events_ignored_total";
    pub const STEP_DURATION_SECONDS: &str = "vframe_step_duration_seconds";
    pub const FRAME_BYTES: &str = "vframe_frame_bytes";
}

/// Workflow step labels.
pub mod steps {
    pub const PRESIGN: &str = "presign";
    pub const PROBE: &str = "probe";
    pub const EXTRACT: &str = "extract";
    pub const UPLOAD: &str = "upload";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a completed extraction.
pub fn record_extraction(entry: &str) {
    let labels = [("entry", entry.to_string())];
    counter!(names::EXTRACTIONS_TOTAL, &labels).increment(1);
}

/// Record a failed invocation.
pub fn record_extraction_failure(entry: &str, stage: &str) {
    let labels = [("entry", entry.to_string()), ("stage", stage.to_string())];
    counter!(names::EXTRACTION_FAILURES_TOTAL, &labels).increment(1);
}

/// Record an event skipped because of its type.
pub fn record_ignored_event() {
    counter!(names::EVENTS_IGNORED_TOTAL).increment(1);
}

/// Record the duration of one workflow step.
pub fn record_step(step: &'static str, elapsed: Duration) {
    histogram!(names::STEP_DURATION_SECONDS, "step" => step).record(elapsed.as_secs_f64());
}

/// Record the size of an extracted frame.
pub fn record_frame_bytes(bytes: usize) {
    histogram!(names::FRAME_BYTES).record(bytes as f64);
}

/// Metrics middleware for HTTP requests.
///
/// Labels requests with the matched route template.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
