//! Upload validation
//!
//! Two checks guard every upload: the extension of the client filename against the configured
//! allow-list, made before anything touches storage, and a byte cap enforced while the body
//! streams through [`UploadValidator::limit_stream`].

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::io;
use thiserror::Error;
use uploadai_core::{AppError, UploadConfig};
use uploadai_storage::naming::final_component;
use uploadai_storage::split_extension;

/// Raised inside the byte stream once an upload passes its cap.
#[derive(Debug, Error)]
#[error("upload exceeds the limit of {limit_bytes} bytes")]
pub struct SizeLimitExceeded {
    pub limit_bytes: u64,
}

/// Wrap a size violation so it can travel through an `AsyncRead`.
pub fn size_limit_error(limit_bytes: u64) -> io::Error {
    io::Error::other(SizeLimitExceeded { limit_bytes })
}

/// The cap carried by `err`, when it was raised by the size guard.
pub fn size_limit_exceeded(err: &io::Error) -> Option<u64> {
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<SizeLimitExceeded>())
        .map(|e| e.limit_bytes)
}

#[derive(Clone, Debug)]
pub struct UploadValidator {
    allowed_extensions: Vec<String>,
    max_file_size_bytes: u64,
}

impl UploadValidator {
    pub fn new(allowed_extensions: Vec<String>, max_file_size_bytes: u64) -> Self {
        Self {
            allowed_extensions,
            max_file_size_bytes,
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(
            config.allowed_extensions.clone(),
            config.max_file_size_bytes,
        )
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Check the extension of `filename` against the allow-list.
    ///
    /// Comparison is exact, so `Song.MP3` is rejected when only `.mp3` is allowed. A name
    /// without an extension is always rejected. Returns the matched extension.
    pub fn check_extension(&self, filename: &str) -> Result<(), AppError> {
        let (_, extension) = split_extension(final_component(filename));

        if !extension.is_empty() && self.allowed_extensions.iter().any(|a| a == extension) {
            return Ok(());
        }

        tracing::debug!(
            filename = %filename,
            extension = %extension,
            "Rejected upload with unsupported extension"
        );
        Err(AppError::UnsupportedExtension {
            extension: extension.to_string(),
            allowed: self.allowed_extensions.clone(),
        })
    }

    /// Pass chunks through until the running total exceeds the cap, then yield an error.
    ///
    /// The chunk that crosses the cap is never forwarded.
    pub fn limit_stream<S>(&self, stream: S) -> impl Stream<Item = io::Result<Bytes>>
    where
        S: Stream<Item = io::Result<Bytes>>,
    {
        let limit_bytes = self.max_file_size_bytes;
        let mut seen: u64 = 0;

        stream.map(move |chunk| {
            let chunk = chunk?;
            seen = seen.saturating_add(chunk.len() as u64);
            if seen > limit_bytes {
                return Err(size_limit_error(limit_bytes));
            }
            Ok(chunk)
        })
    }
}
