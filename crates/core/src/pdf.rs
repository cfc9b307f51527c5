//! PDF payload validation.
//!
//! The catalog never parses PDF internals; it only guards what enters the
//! store: non-empty payload, configured size limit, content-type and filename
//! extension allow-lists, and a magic-byte sniff.

use crate::error::{Error, Result};

/// Accepted content types for sheet payloads.
const ALLOWED_CONTENT_TYPES: &[&str] = &["application/pdf"];

/// Accepted filename extensions (lowercased).
const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// PDF magic bytes: `%PDF`.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// An incoming binary payload, as extracted from a multipart upload.
#[derive(Debug, Clone)]
pub struct PdfPayload {
    pub filename: String,
    pub content_type: String,
    pub data: bytes::Bytes,
}

impl PdfPayload {
    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Validate a PDF payload against the configured size limit.
///
/// Checks, in order: non-empty, size limit, content-type allow-list,
/// filename extension, magic bytes.
pub fn validate_pdf(payload: &PdfPayload, max_size: u64) -> Result<()> {
    if payload.data.is_empty() {
        return Err(Error::Validation("file is empty".to_string()));
    }

    if payload.size() > max_size {
        return Err(Error::Validation(format!(
            "file too large: {} (limit {})",
            format_file_size(payload.size()),
            format_file_size(max_size)
        )));
    }

    if !ALLOWED_CONTENT_TYPES.contains(&payload.content_type.as_str()) {
        return Err(Error::Validation(format!(
            "unsupported content type '{}', expected application/pdf",
            payload.content_type
        )));
    }

    let extension = payload
        .filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::Validation(format!(
            "file must have a .pdf extension, got '.{extension}'"
        )));
    }

    if payload.data.len() < PDF_MAGIC.len() || &payload.data[..PDF_MAGIC.len()] != PDF_MAGIC {
        return Err(Error::Validation(
            "file does not look like a PDF (bad magic bytes)".to_string(),
        ));
    }

    Ok(())
}

/// Format a byte count for display ("1.5 MB" / "512.0 KB").
pub fn format_file_size(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    if mb >= 1.0 {
        format!("{:.2} MB", mb)
    } else {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    }
}
