//! upload-ai core library
//!
//! Domain models, the error taxonomy and configuration shared by every upload-ai crate.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
