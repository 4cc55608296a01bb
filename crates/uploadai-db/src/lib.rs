//! Database layer for upload-ai
//!
//! Pool construction, schema migrations and the `videos` repository. The HTTP layer depends on
//! [`VideoRecordStore`] rather than on Postgres directly.

pub mod migrations;
pub mod pool;
pub mod video;

pub use migrations::{migrations_dir, run_migrations};
pub use pool::connect;
pub use video::{VideoRecordStore, VideoRepository};
