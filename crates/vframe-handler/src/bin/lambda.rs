//! AWS Lambda runtime binary.

use lambda_runtime::{run, service_fn, LambdaEvent};
use serde_json::Value;
use tracing::info;

use vframe_handler::lambda::{dispatch, LambdaError};
use vframe_handler::{init_tracing, AppState, HandlerConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing(LogFormat::from_env_or(LogFormat::Json));

    let config = HandlerConfig::from_env();
    let state = AppState::from_env(config).await?;
    info!("vframe-lambda ready");

    run(service_fn(|event: LambdaEvent<Value>| dispatch(&state, event.payload))).await
}
