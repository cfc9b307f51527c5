//! Configuration types shared across crates.

use crate::DEFAULT_MAX_PDF_SIZE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    Sqlite {
        /// Path to the SQLite database file.
        path: PathBuf,
    },
}

/// Storage backend configuration for standalone file uploads.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    Filesystem {
        /// Root directory for stored files.
        path: PathBuf,
    },
}

/// File validation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Maximum accepted PDF payload size in bytes.
    #[serde(default = "default_max_pdf_size")]
    pub max_pdf_size_bytes: u64,
}

fn default_max_pdf_size() -> u64 {
    DEFAULT_MAX_PDF_SIZE
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            max_pdf_size_bytes: default_max_pdf_size(),
        }
    }
}

/// Authorization posture for sheet mutation endpoints.
///
/// The integrating system decides whether update/replace/delete must be
/// performed by the sheet's owner. When `enforce_owner` is set, mutation
/// requests must carry a caller id matching the resolved owner.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    #[serde(default)]
    pub enforce_owner: bool,
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub metadata: MetadataConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub authorization: AuthorizationConfig,
}

impl AppConfig {
    /// Create a test configuration rooted at a temporary directory.
    ///
    /// **For testing only.**
    pub fn for_testing(root: &std::path::Path) -> Self {
        Self {
            server: ServerConfig::default(),
            metadata: MetadataConfig::Sqlite {
                path: root.join("metadata.db"),
            },
            storage: StorageConfig::Filesystem {
                path: root.join("files"),
            },
            files: FilesConfig::default(),
            authorization: AuthorizationConfig::default(),
        }
    }
}
