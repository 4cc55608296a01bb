//! Database setup and initialization

use anyhow::{Context, Result};
use sqlx::PgPool;
use uploadai_core::Config;

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = uploadai_db::connect(
        &config.database_url,
        config.db_max_connections,
        config.db_timeout_seconds,
    )
    .await
    .context("Failed to connect to database")?;

    uploadai_db::run_migrations(&pool).await?;

    Ok(pool)
}
