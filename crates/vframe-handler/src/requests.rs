//! Request-triggered entry point.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use vframe_models::{ExtractionResult, FrameRequest};

use crate::error::{HandlerError, HandlerResult};
use crate::logging::InvocationLogger;
use crate::metrics;
use crate::state::AppState;

const ENTRY: &str = "request";

/// `{statusCode, body}` reply of the synchronous entry point; `body` is a
/// JSON document encoded as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    /// Serialize `body` with the given status.
    pub fn json(status_code: u16, body: &impl Serialize) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status_code, body },
            Err(e) => Self {
                status_code: 500,
                body: serde_json::json!({ "detail": e.to_string() }).to_string(),
            },
        }
    }

    /// 200 with the extraction result.
    pub fn ok(result: &ExtractionResult) -> Self {
        Self::json(200, result)
    }

    /// Error status and body for `err`.
    pub fn from_error(err: &HandlerError, production: bool) -> Self {
        Self::json(err.status_code(), &err.to_response(production))
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

/// Handle a synchronous extraction request.
///
/// - missing `bucketName` / `key` → 400 naming the field
/// - source object absent → 400 echoing `bucket_name` and `file`
/// - probe, extraction or storage failure → 500
/// - success → 200 with the result and the caller's `requestId`
pub async fn handle_request(state: &AppState, body: &str) -> HandlerResponse {
    let production = state.config.is_production();

    match process_request(state, body).await {
        Ok(result) => HandlerResponse::ok(&result),
        Err(e) => HandlerResponse::from_error(&e, production),
    }
}

/// Validate, check the source and run the workflow.
pub async fn process_request(state: &AppState, body: &str) -> HandlerResult<ExtractionResult> {
    let frame_request: FrameRequest =
        serde_json::from_str(body).map_err(|e| HandlerError::InvalidBody(e.to_string()))?;

    let logger = InvocationLogger::new(frame_request.request_id.as_deref(), ENTRY);
    let request_id = frame_request.request_id.clone();

    let result = async {
        let request = frame_request.into_extraction_request()?;
        logger.log_start(&request.source_uri());

        let exists = state
            .store()
            .exists(&request.source_bucket, &request.source_key)
            .await?;
        if !exists {
            return Err(HandlerError::source_not_found(
                &request.source_bucket,
                &request.source_key,
            ));
        }

        state
            .workflow
            .extract(&request)
            .instrument(logger.create_span())
            .await
    }
    .await;

    match result {
        Ok(extraction) => {
            metrics::record_extraction(ENTRY);
            logger.log_completion(&extraction.image);
            Ok(extraction.with_request_id(request_id))
        }
        Err(e) => {
            metrics::record_extraction_failure(ENTRY, e.stage());
            if e.is_client_error() {
                logger.log_warning(&e.to_string());
            } else {
                logger.log_error(&e.to_string());
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_response_shape() {
        let response = HandlerResponse::json(400, &serde_json::json!({ "detail": "x" }));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 400);
        assert_eq!(value["body"], r#"{"detail":"x"}"#);
        assert_eq!(response.body_json().unwrap()["detail"], "x");
    }

    #[test]
    fn test_from_error() {
        let err = HandlerError::MissingField("key");
        let response = HandlerResponse::from_error(&err, true);

        assert_eq!(response.status_code, 400);
        assert_eq!(response.body_json().unwrap()["field"], "key");
    }
}
