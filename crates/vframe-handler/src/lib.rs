//! Video frame extraction handler.
//!
//! This crate provides:
//! - The presign → probe → extract → upload workflow
//! - An event entry point for "Object Created" notifications
//! - A synchronous request entry point returning `{statusCode, body}`
//! - An Axum HTTP server and a Lambda runtime binary over both
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod lambda;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod requests;
pub mod routes;
pub mod state;
pub mod workflow;

pub use config::HandlerConfig;
pub use error::{ErrorResponse, HandlerError, HandlerResult};
pub use events::handle_event;
pub use logging::{init_tracing, InvocationLogger, LogFormat};
pub use requests::{handle_request, process_request, HandlerResponse};
pub use routes::create_router;
pub use state::AppState;
pub use workflow::ExtractionWorkflow;
