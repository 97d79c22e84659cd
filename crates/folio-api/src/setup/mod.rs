//! Application setup and initialization
//!
//! Wires configuration, telemetry, the database, the media store and the
//! router together.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::Router;
use folio_core::Config;
use folio_db::{PgMetadataStore, UserRepository};
use std::sync::Arc;

/// Initialize the application with all services and dependencies
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    folio_infra::init_telemetry(config.json_logs())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        port = config.server_port(),
        "Starting Folio API"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::initialize_storage(&config).await?;

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(PgMetadataStore::new(pool.clone())),
        Arc::new(UserRepository::new(pool)),
        storage,
    ));

    let app = routes::setup_routes(&config, state.clone())?;

    Ok((state, app))
}
