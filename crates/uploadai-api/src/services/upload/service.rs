//! Video upload service
//!
//! Runs one upload through the pipeline: take the file part → check its extension → derive
//! the stored name → stream it to storage under the size cap → record its metadata.
//! Nothing is written before the extension check passes and no record exists unless the
//! file was written completely.

use std::io;
use std::sync::Arc;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use futures::StreamExt;
use tokio_util::io::StreamReader;
use uploadai_core::models::VideoRecord;
use uploadai_core::AppError;
use uploadai_storage::{generate_upload_name, StorageError, StoredFile};

use crate::error::app_error_from_storage;
use crate::state::AppState;
use crate::validation::{size_limit_error, UploadValidator};

pub struct VideoUploadService {
    state: Arc<AppState>,
    validator: UploadValidator,
}

impl VideoUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
            validator: UploadValidator::from_config(&state.config.upload),
        }
    }

    /// Ingest the first file part of `multipart` and return the created record.
    pub async fn upload(&self, mut multipart: Multipart) -> Result<VideoRecord, AppError> {
        let limit_bytes = self.validator.max_file_size_bytes();

        // First part carrying a filename; other parts are skipped.
        let (field, original_name) = loop {
            match multipart.next_field().await {
                Ok(Some(field)) => {
                    let Some(name) = field.file_name().map(str::to_owned) else {
                        continue;
                    };
                    break (field, name);
                }
                Ok(None) => return Err(AppError::MissingFile),
                Err(e) => return Err(multipart_part_error(e, limit_bytes)),
            }
        };

        self.validator.check_extension(&original_name)?;

        let upload_name = generate_upload_name(&original_name);

        tracing::info!(
            original_filename = %original_name,
            upload_name = %upload_name,
            "Processing upload"
        );

        let stored = self.stream_to_storage(field, &upload_name).await?;

        self.persist(&original_name, stored).await
    }

    /// Stream the part body into storage through the size guard.
    async fn stream_to_storage(
        &self,
        field: Field<'_>,
        upload_name: &str,
    ) -> Result<StoredFile, AppError> {
        let limit_bytes = self.validator.max_file_size_bytes();
        let chunks =
            field.map(move |chunk| chunk.map_err(|e| multipart_io_error(e, limit_bytes)));
        let reader = StreamReader::new(self.validator.limit_stream(chunks));

        match self
            .state
            .storage
            .upload_stream(upload_name, Box::pin(reader))
            .await
        {
            Ok(stored) => Ok(stored),
            Err(err) => {
                self.handle_partial_file(upload_name, &err).await;
                Err(app_error_from_storage(err))
            }
        }
    }

    /// Apply the partial-file policy after a failed transfer.
    async fn handle_partial_file(&self, upload_name: &str, err: &StorageError) {
        if !err.may_leave_partial_file() {
            return;
        }

        if !self.state.config.upload.cleanup_partial_files {
            tracing::warn!(
                upload_name = %upload_name,
                error = %err,
                "Transfer failed; partial file left in storage"
            );
            return;
        }

        match self.state.storage.delete(upload_name).await {
            Ok(()) => tracing::info!(
                upload_name = %upload_name,
                error = %err,
                "Transfer failed; partial file removed"
            ),
            Err(e) => tracing::warn!(
                upload_name = %upload_name,
                error = %e,
                "Failed to remove partial file"
            ),
        }
    }

    /// Create the metadata record, deleting the stored file if the insert fails.
    async fn persist(
        &self,
        original_name: &str,
        stored: StoredFile,
    ) -> Result<VideoRecord, AppError> {
        let path = stored.path.to_string_lossy().into_owned();

        match self.state.store.create_video(original_name, &path).await {
            Ok(video) => {
                tracing::info!(
                    video_id = %video.id,
                    path = %path,
                    size_bytes = stored.size_bytes,
                    "Upload recorded"
                );
                Ok(video)
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    path = %path,
                    "Failed to record upload, removing stored file"
                );
                if let Err(e) = self.state.storage.delete(&stored.key).await {
                    tracing::warn!(
                        error = %e,
                        path = %path,
                        "Failed to remove file for unrecorded upload"
                    );
                }
                Err(err)
            }
        }
    }
}

/// A multipart framing error before any file part was found.
fn multipart_part_error(err: MultipartError, limit_bytes: u64) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge { limit_bytes };
    }
    tracing::debug!(error = %err, "Malformed multipart body");
    AppError::MissingFile
}

/// Body read errors keep their size-limit meaning when the transport cap trips first.
fn multipart_io_error(err: MultipartError, limit_bytes: u64) -> io::Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        size_limit_error(limit_bytes)
    } else {
        io::Error::other(err)
    }
}
