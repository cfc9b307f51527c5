//! Application state.

use scorebook_catalog::{Argon2Hasher, SheetCatalog, UserDirectory};
use scorebook_core::AppConfig;
use scorebook_metadata::MetadataStore;
use scorebook_storage::ObjectStore;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metadata: Arc<dyn MetadataStore>,
    pub storage: Arc<dyn ObjectStore>,
    pub catalog: Arc<SheetCatalog>,
    pub users: Arc<UserDirectory>,
}

impl AppState {
    /// Assemble the state: the mutation policy comes from configuration,
    /// the services are wired over the shared stores.
    pub fn new(
        config: AppConfig,
        metadata: Arc<dyn MetadataStore>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        let policy = scorebook_catalog::policy::from_config(&config.authorization);
        let catalog = Arc::new(SheetCatalog::new(
            metadata.clone(),
            policy,
            config.files.max_pdf_size_bytes,
        ));
        let users = Arc::new(UserDirectory::new(metadata.clone(), Arc::new(Argon2Hasher)));

        Self {
            config: Arc::new(config),
            metadata,
            storage,
            catalog,
            users,
        }
    }
}
