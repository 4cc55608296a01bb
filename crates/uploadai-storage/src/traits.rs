//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The destination file could not be created. Nothing was written.
    #[error("Create failed: {0}")]
    CreateFailed(String),

    /// Writing to or syncing the destination failed after it was created.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// The inbound byte source errored mid-transfer (client disconnect, size guard, ...).
    #[error("Source stream failed: {0}")]
    SourceFailed(#[source] io::Error),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// Whether a (possibly partial) destination file may exist after this error.
    pub fn may_leave_partial_file(&self) -> bool {
        matches!(
            self,
            StorageError::UploadFailed(_) | StorageError::SourceFailed(_)
        )
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A file that was fully written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Storage key (the file name under the storage root)
    pub key: String,
    /// Absolute location of the file
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Storage abstraction trait
///
/// The upload pipeline only talks to this trait, so the filesystem backend can be swapped
/// for a test double or another backend without touching the handler.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream `reader` into a newly created file named `filename`.
    ///
    /// The reader is consumed until EOF and never buffered whole. Both the reader and the
    /// destination handle are released before this returns, whatever the outcome.
    async fn upload_stream<'a>(
        &self,
        filename: &str,
        reader: Pin<Box<dyn AsyncRead + Send + 'a>>,
    ) -> StorageResult<StoredFile>;

    /// Read a whole file back by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key. Deleting a missing file succeeds.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Absolute root directory of this storage
    fn root(&self) -> &Path;
}
