//! Metadata persistence for the scorebook catalog.
//!
//! Users, sheets and the relationship ledger live in a single SQLite
//! database. The [`MetadataStore`] trait combines the per-entity repository
//! traits so service code depends on one object.

pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use models::{SheetRelationRow, SheetRow, UserRow};
pub use repos::{RelationRepo, SheetRepo, UserRepo};
pub use store::{MetadataStore, SqliteStore};

use scorebook_core::MetadataConfig;
use std::sync::Arc;

/// Build a metadata store from configuration.
pub async fn from_config(config: &MetadataConfig) -> MetadataResult<Arc<dyn MetadataStore>> {
    match config {
        MetadataConfig::Sqlite { path } => {
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store))
        }
    }
}
