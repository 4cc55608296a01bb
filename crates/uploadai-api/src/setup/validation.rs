//! Configuration validation
//!
//! Re-checks the loaded configuration at startup and warns about settings that are legal
//! but probably unintended.

use anyhow::Result;
use uploadai_core::Config;

/// 1 GiB
const LARGE_UPLOAD_WARN_BYTES: u64 = 1024 * 1024 * 1024;

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.upload.upload_dir.is_relative() {
        tracing::warn!(
            upload_dir = %config.upload.upload_dir.display(),
            "UPLOAD_DIR is relative and resolves against the working directory"
        );
    }

    if config.upload.max_file_size_bytes > LARGE_UPLOAD_WARN_BYTES {
        tracing::warn!(
            max_file_size_bytes = config.upload.max_file_size_bytes,
            "MAX_UPLOAD_SIZE_BYTES is above 1 GiB"
        );
    }

    if config.is_production() && !config.upload.cleanup_partial_files {
        tracing::warn!(
            "UPLOAD_CLEANUP_PARTIAL_FILES is disabled; interrupted uploads stay in UPLOAD_DIR"
        );
    }

    Ok(())
}
