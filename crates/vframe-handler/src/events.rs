//! Event-triggered entry point.

use serde_json::Value;
use tracing::Instrument;

use vframe_models::{ExtractionRequest, ExtractionResult, StorageEvent, DEFAULT_TIME_OFFSET};

use crate::error::HandlerResult;
use crate::logging::InvocationLogger;
use crate::metrics;
use crate::state::AppState;

const ENTRY: &str = "event";

/// Handle a storage-change event.
///
/// Events other than "Object Created" are logged and ignored (`Ok(None)`)
/// without touching storage. Object-created events are extracted at offset
/// zero into the configured output bucket/path, defaulting to the source
/// bucket and the fixed output prefix.
pub async fn handle_event(
    state: &AppState,
    payload: Value,
) -> HandlerResult<Option<ExtractionResult>> {
    let logger = InvocationLogger::new(None, ENTRY);

    if !StorageEvent::is_object_created(&payload) {
        let detail_type = StorageEvent::detail_type_of(&payload).unwrap_or("<none>");
        logger.log_warning(&format!("Not a supported event type: {}", detail_type));
        metrics::record_ignored_event();
        return Ok(None);
    }

    let result = process_event(state, payload, &logger).await;

    match &result {
        Ok(extraction) => {
            metrics::record_extraction(ENTRY);
            logger.log_completion(&extraction.image);
        }
        Err(e) => {
            metrics::record_extraction_failure(ENTRY, e.stage());
            logger.log_error(&e.to_string());
        }
    }

    result.map(Some)
}

async fn process_event(
    state: &AppState,
    payload: Value,
    logger: &InvocationLogger,
) -> HandlerResult<ExtractionResult> {
    let event = StorageEvent::from_value(payload)?;
    let object = event.object_ref()?;
    logger.log_start(&format!("s3://{}/{}", object.bucket, object.key));

    let request = event_request(state, &object.bucket, &object.key);

    state
        .workflow
        .extract(&request)
        .instrument(logger.create_span())
        .await
}

/// Resolve the destination of an event-triggered extraction.
fn event_request(state: &AppState, bucket: &str, key: &str) -> ExtractionRequest {
    let output_bucket = state.config.event_output_bucket(bucket).to_string();

    ExtractionRequest::new(bucket, key)
        .with_destination(output_bucket, state.config.output_path.clone())
        .with_time_offset(DEFAULT_TIME_OFFSET)
}
