//! Error types module
//!
//! All errors raised while ingesting an upload are unified under [`AppError`]. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`], so the API layer never has to
//! match on variants itself.
//!
//! The `Database` variant carries a `sqlx::Error` when the `sqlx` feature is enabled and a plain
//! message otherwise.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as validation failures
    Debug,
    /// Recoverable issues
    Warn,
    /// Unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "MISSING_FILE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing file input")]
    MissingFile,

    #[error("Unsupported file extension '{extension}' (allowed: {allowed:?})")]
    UnsupportedExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("File exceeds upload limit of {limit_bytes} bytes")]
    PayloadTooLarge { limit_bytes: u64 },

    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

/// Message shown when an upload's extension is not on the allow-list.
///
/// `[".mp3"]` renders as `Invalid input type, please upload an MP3 file.`
pub fn unsupported_extension_message(allowed: &[String]) -> String {
    let kinds: Vec<String> = allowed
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_uppercase())
        .collect();
    format!(
        "Invalid input type, please upload an {} file.",
        kinds.join(" or ")
    )
}

/// Whole mebibytes as `N MB`, anything else in bytes.
fn format_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::MissingFile => (400, "MISSING_FILE", LogLevel::Debug),
        AppError::UnsupportedExtension { .. } => (400, "UNSUPPORTED_EXTENSION", LogLevel::Debug),
        AppError::PayloadTooLarge { .. } => (413, "PAYLOAD_TOO_LARGE", LogLevel::Debug),
        AppError::TransferFailed(_) => (500, "TRANSFER_FAILED", LogLevel::Error),
        AppError::Database(_) => (500, "DATABASE_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &str {
        match self {
            AppError::MissingFile => "MissingFile",
            AppError::UnsupportedExtension { .. } => "UnsupportedExtension",
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::TransferFailed(_) => "TransferFailure",
            AppError::Database(_) => "MetadataPersistFailure",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingFile => "Missing file input.".to_string(),
            AppError::UnsupportedExtension { allowed, .. } => {
                unsupported_extension_message(allowed)
            }
            AppError::PayloadTooLarge { limit_bytes } => format!(
                "File exceeds the maximum upload size of {}.",
                format_size(*limit_bytes)
            ),
            AppError::TransferFailed(_) => "Failed to store uploaded file".to_string(),
            AppError::Database(_) => "Failed to record uploaded file".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_missing_file() {
        let err = AppError::MissingFile;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "MISSING_FILE");
        assert_eq!(err.client_message(), "Missing file input.");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_unsupported_extension() {
        let err = AppError::UnsupportedExtension {
            extension: ".txt".to_string(),
            allowed: vec![".mp3".to_string()],
        };
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(
            err.client_message(),
            "Invalid input type, please upload an MP3 file."
        );
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn test_unsupported_extension_message_lists_every_kind() {
        let allowed = vec![".mp3".to_string(), ".wav".to_string()];
        assert_eq!(
            unsupported_extension_message(&allowed),
            "Invalid input type, please upload an MP3 or WAV file."
        );
    }

    #[test]
    fn test_error_metadata_payload_too_large() {
        let err = AppError::PayloadTooLarge {
            limit_bytes: 50 * 1024 * 1024,
        };
        assert_eq!(err.http_status_code(), 413);
        assert!(err.client_message().contains("50 MB"));

        let err = AppError::PayloadTooLarge { limit_bytes: 1024 };
        assert_eq!(
            err.client_message(),
            "File exceeds the maximum upload size of 1024 bytes."
        );
    }

    #[test]
    fn test_error_metadata_transfer_failed_hides_details() {
        let err = AppError::TransferFailed("disk full at /srv/tmp/a.mp3".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "TRANSFER_FAILED");
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(!err.client_message().contains("/srv/tmp"));
    }

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert_eq!(err.client_message(), "Failed to record uploaded file");
        assert_eq!(err.error_type(), "MetadataPersistFailure");
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        let details = err.detailed_message();
        assert!(details.starts_with("Database error:"));
        assert!(details.contains("Caused by:"));
    }
}
