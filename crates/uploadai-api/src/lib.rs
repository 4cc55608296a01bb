//! upload-ai HTTP API
//!
//! Router, handlers and the upload pipeline that ties storage and the metadata store together.

mod api_doc;
mod telemetry;

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod validation;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
