//! Object store trait.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Metadata about a stored object.
#[derive(Debug, Clone)]
pub struct ObjectMeta {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, if the backend tracks it.
    pub last_modified: Option<std::time::SystemTime>,
}

/// Abstract object storage for standalone file uploads.
///
/// Sheet PDFs live in the metadata store; this trait backs the separate
/// upload area where callers can stash arbitrary files by key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check if an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get object metadata. Fails with `NotFound` if absent.
    async fn head(&self, key: &str) -> StorageResult<ObjectMeta>;

    /// Read an object fully into memory. Fails with `NotFound` if absent.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Write an object, replacing any existing content under the key.
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Delete an object. Fails with `NotFound` if absent.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys under a prefix. An empty prefix lists everything.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Check backend health.
    async fn health_check(&self) -> StorageResult<()>;
}
