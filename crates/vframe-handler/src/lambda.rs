//! Lambda payload dispatch.
//!
//! Payloads carrying `detail-type` are storage events; anything else is a
//! synchronous request, either wrapped in an API Gateway proxy envelope
//! (`body` string) or sent as the bare request object.

use serde_json::{json, Value};

use crate::events::handle_event;
use crate::requests::handle_request;
use crate::state::AppState;

/// Error returned to the Lambda runtime.
pub type LambdaError = lambda_runtime::Error;

/// Route one invocation payload to the event or request entry point.
///
/// Events answer `{statusCode: 200, body: "<result JSON>"}`, or `null` when
/// the event type is ignored. Event failures are returned as errors so the
/// runtime can retry or dead-letter them. Requests always answer with their
/// `{statusCode, body}` response.
pub async fn dispatch(state: &AppState, payload: Value) -> Result<Value, LambdaError> {
    if payload.get("detail-type").is_some() {
        return match handle_event(state, payload).await? {
            Some(result) => Ok(json!({
                "statusCode": 200,
                "body": serde_json::to_string(&result)?,
            })),
            None => Ok(Value::Null),
        };
    }

    let response = handle_request(state, &request_body(&payload)).await;
    Ok(serde_json::to_value(response)?)
}

/// Request JSON carried by `payload`.
fn request_body(payload: &Value) -> String {
    match payload.get("body").and_then(Value::as_str) {
        Some(body) => body.to_string(),
        None => payload.to_string(),
    }
}
