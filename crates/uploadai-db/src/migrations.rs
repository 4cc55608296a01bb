//! Schema migrations, read from the workspace `migrations/` directory.

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use std::path::{Path, PathBuf};

/// Workspace `migrations/` directory, resolved from this crate's manifest.
pub fn migrations_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations")
}

/// Apply every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrator = Migrator::new(migrations_dir())
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");
    Ok(())
}
