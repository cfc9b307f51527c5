//! Core domain types and shared logic for the Scorebook catalog.
//!
//! This crate defines what the other crates agree on:
//! - Application configuration
//! - Search criteria and sort keys
//! - PDF payload validation (size, type, extension, magic bytes)
//! - Core error type

pub mod config;
pub mod error;
pub mod pdf;
pub mod search;

pub use config::{
    AppConfig, AuthorizationConfig, FilesConfig, MetadataConfig, ServerConfig, StorageConfig,
};
pub use error::{Error, Result};
pub use pdf::{format_file_size, validate_pdf, PdfPayload};
pub use search::{SearchCriteria, SortKey};

/// Default maximum PDF payload size: 5 MiB.
///
/// One limit for every upload path, overridable via
/// `files.max_pdf_size_bytes`.
pub const DEFAULT_MAX_PDF_SIZE: u64 = 5 * 1024 * 1024;

/// Cap applied to the recent-sheets listing.
pub const RECENT_SHEETS_LIMIT: usize = 20;
