use anyhow::{Context, Result};
use folio_core::Config;
use folio_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn initialize_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize media store")?;

    tracing::info!(
        backend = ?storage.backend_type(),
        "Media store initialized"
    );

    Ok(storage)
}
