//! Application setup and initialization
//!
//! Everything `main` needs before serving: config checks, tracing, the database pool, the
//! storage root and the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use uploadai_core::Config;
use uploadai_db::VideoRepository;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = AppState::new(config, storage, Arc::new(VideoRepository::new(pool)));

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
