//! Catalog service error types.

use scorebook_metadata::MetadataError;
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("metadata error: {0}")]
    Metadata(#[source] MetadataError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<MetadataError> for CatalogError {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::NotFound(msg) => CatalogError::NotFound(msg),
            MetadataError::AlreadyExists(msg) => CatalogError::Conflict(msg),
            MetadataError::InvalidOperation(msg) => CatalogError::InvalidOperation(msg),
            other => CatalogError::Metadata(other),
        }
    }
}

impl From<scorebook_core::Error> for CatalogError {
    fn from(e: scorebook_core::Error) -> Self {
        match e {
            scorebook_core::Error::Validation(msg) => CatalogError::Validation(msg),
            scorebook_core::Error::Config(msg) => CatalogError::Internal(msg),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
