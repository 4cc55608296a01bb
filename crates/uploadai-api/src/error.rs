//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every failure renders as `{"error": "..."}` with
//! the status and client message described by [`ErrorMetadata`]; the full error chain only
//! goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uploadai_core::{AppError, ErrorMetadata, LogLevel};
use uploadai_storage::StorageError;
use utoipa::ToSchema;

use crate::validation::size_limit_exceeded;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: IntoResponse and AppError both live in other crates)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(app_error_from_storage(err))
    }
}

/// Classify a storage failure.
///
/// A source error raised by the size guard becomes `PayloadTooLarge`; every other failure on
/// the write path is a `TransferFailed`.
pub fn app_error_from_storage(err: StorageError) -> AppError {
    match err {
        StorageError::SourceFailed(source) => match size_limit_exceeded(&source) {
            Some(limit_bytes) => AppError::PayloadTooLarge { limit_bytes },
            None => AppError::TransferFailed(format!("Upload stream interrupted: {}", source)),
        },
        StorageError::CreateFailed(msg) | StorageError::UploadFailed(msg) => {
            AppError::TransferFailed(msg)
        }
        StorageError::InvalidKey(msg) => AppError::Internal(format!("Invalid storage key: {}", msg)),
        StorageError::NotFound(key) => AppError::Internal(format!("File not found: {}", key)),
        StorageError::DownloadFailed(msg)
        | StorageError::DeleteFailed(msg)
        | StorageError::ConfigError(msg) => AppError::Internal(msg),
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    let details = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(
                error = %details,
                error_type = error_type,
                error_code = error_code,
                "Request rejected"
            );
        }
        LogLevel::Warn => {
            tracing::warn!(
                error = %details,
                error_type = error_type,
                error_code = error_code,
                "Error occurred"
            );
        }
        LogLevel::Error => {
            tracing::error!(
                error = %details,
                error_type = error_type,
                error_code = error_code,
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
        });

        (status, body).into_response()
    }
}
