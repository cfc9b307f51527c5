//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] scorebook_catalog::CatalogError),

    #[error("storage error: {0}")]
    Storage(#[from] scorebook_storage::StorageError),

    #[error("metadata error: {0}")]
    Metadata(#[from] scorebook_metadata::MetadataError),

    #[error("core error: {0}")]
    Core(#[from] scorebook_core::Error),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Forbidden(_) => "forbidden",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal_error",
            Self::Catalog(e) => match e {
                scorebook_catalog::CatalogError::NotFound(_) => "not_found",
                scorebook_catalog::CatalogError::Conflict(_) => "conflict",
                scorebook_catalog::CatalogError::InvalidOperation(_) => "invalid_operation",
                scorebook_catalog::CatalogError::Validation(_) => "validation_failed",
                scorebook_catalog::CatalogError::Forbidden(_) => "forbidden",
                _ => "catalog_error",
            },
            Self::Storage(_) => "storage_error",
            Self::Metadata(_) => "metadata_error",
            Self::Core(_) => "core_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Catalog(e) => match e {
                scorebook_catalog::CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                scorebook_catalog::CatalogError::Conflict(_) => StatusCode::CONFLICT,
                scorebook_catalog::CatalogError::InvalidOperation(_) => StatusCode::CONFLICT,
                scorebook_catalog::CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
                scorebook_catalog::CatalogError::Forbidden(_) => StatusCode::FORBIDDEN,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Storage(e) => match e {
                scorebook_storage::StorageError::NotFound(_) => StatusCode::NOT_FOUND,
                scorebook_storage::StorageError::InvalidKey(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Metadata(e) => match e {
                scorebook_metadata::MetadataError::NotFound(_) => StatusCode::NOT_FOUND,
                scorebook_metadata::MetadataError::AlreadyExists(_) => StatusCode::CONFLICT,
                scorebook_metadata::MetadataError::InvalidOperation(_) => StatusCode::CONFLICT,
                scorebook_metadata::MetadataError::Constraint(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Core(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
