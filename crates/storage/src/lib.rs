//! Object storage for standalone file uploads.

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::FilesystemBackend;
pub use error::{StorageError, StorageResult};
pub use traits::{ObjectMeta, ObjectStore};

use scorebook_core::StorageConfig;
use std::sync::Arc;

/// Build an object store from configuration.
pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn ObjectStore>> {
    match config {
        StorageConfig::Filesystem { path } => {
            let backend = FilesystemBackend::new(path).await?;
            Ok(Arc::new(backend))
        }
    }
}
