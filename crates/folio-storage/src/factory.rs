use crate::{LocalStorage, Storage, StorageBackend, StorageResult};
use folio_core::Config;
use std::sync::Arc;

/// Create the media store backend selected by configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        StorageBackend::Local => {
            let storage = LocalStorage::new(config.local_storage_path()).await?;
            tracing::info!(
                path = %config.local_storage_path(),
                "Local media store initialized"
            );
            Ok(Arc::new(storage))
        }
    }
}
