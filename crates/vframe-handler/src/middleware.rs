//! HTTP middleware: request correlation and access logging.

use std::time::Instant;

use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use axum::middleware::Next;
use tracing::{info, warn};
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Paths polled by orchestrators and scrapers; not access-logged.
const QUIET_PATHS: [&str; 2] = ["/health", "/metrics"];

/// Correlation id of an HTTP request, stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Adopt the caller's `x-request-id` or mint one, and echo it back.
pub async fn request_id(mut request: Request<Body>, next: Next) -> Response<Body> {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let header = HeaderValue::from_str(&id).ok();
    request.extensions_mut().insert(RequestId(id));

    let mut response = next.run(request).await;
    if let Some(header) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, header);
    }
    response
}

/// Log one line per extraction call, at `warn` for server errors.
///
/// Must run inside [`request_id`] so the correlation id is available.
pub async fn request_logging(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_default();
    let started = Instant::now();

    let response = next.run(request).await;

    if QUIET_PATHS.contains(&path.as_str()) {
        return response;
    }

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if response.status().is_server_error() {
        warn!(request_id = %id, %method, %path, status, elapsed_ms, "Extraction call failed");
    } else {
        info!(request_id = %id, %method, %path, status, elapsed_ms, "Extraction call handled");
    }

    response
}
