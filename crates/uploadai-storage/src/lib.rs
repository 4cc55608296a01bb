//! upload-ai storage library
//!
//! Storage abstraction for uploaded files plus the local filesystem implementation.
//!
//! # Naming
//!
//! Uploaded files live flat under the storage root as `<base>-<uuid><ext>`, see [`naming`].
//! Keys are bare file names: they must not contain path separators or be `.`/`..`.

pub mod local;
pub mod naming;
pub mod pump;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use naming::{generate_upload_name, split_extension};
pub use pump::{pump, PumpError};
pub use traits::{Storage, StorageError, StorageResult, StoredFile};
