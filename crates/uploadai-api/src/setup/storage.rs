//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use uploadai_core::Config;
use uploadai_storage::{LocalStorage, Storage};

/// Create the upload directory if needed and open local storage on it.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.upload.upload_dir)
        .await
        .context("Failed to initialize upload storage")?;

    tracing::info!(
        root = %storage.root().display(),
        "Local storage initialized"
    );

    Ok(Arc::new(storage))
}
