use crate::auth::JwtService;
use folio_core::Config;
use folio_db::{MetadataStore, UserStore};
use folio_services::{GalleryService, IngestionPipeline};
use folio_storage::Storage;
use std::sync::Arc;

/// Shared state handed to every handler
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn MetadataStore>,
    pub users: Arc<dyn UserStore>,
    pub storage: Arc<dyn Storage>,
    pub pipeline: IngestionPipeline,
    pub gallery: GalleryService,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn MetadataStore>,
        users: Arc<dyn UserStore>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let pipeline = IngestionPipeline::from_config(&config, storage.clone(), store.clone());
        let gallery = GalleryService::new(store.clone());
        let jwt = JwtService::new(config.jwt_secret(), config.jwt_expiry_hours());

        Self {
            config,
            store,
            users,
            storage,
            pipeline,
            gallery,
            jwt,
        }
    }
}
