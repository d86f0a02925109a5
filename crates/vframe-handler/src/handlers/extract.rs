//! Extraction handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::events::handle_event;
use crate::requests::{handle_request, HandlerResponse};
use crate::state::AppState;

/// POST /events
///
/// 200 with the result for object-created events, 204 for ignored event
/// types, the error status otherwise.
pub async fn post_event(State(state): State<AppState>, Json(payload): Json<Value>) -> Response {
    match handle_event(&state, payload).await {
        Ok(Some(result)) => HandlerResponse::ok(&result).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => HandlerResponse::from_error(&e, state.config.is_production()).into_response(),
    }
}

/// POST /extract
pub async fn post_extract(State(state): State<AppState>, body: String) -> HandlerResponse {
    handle_request(&state, &body).await
}
