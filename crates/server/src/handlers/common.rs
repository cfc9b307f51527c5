//! Shared handler helpers.

use crate::error::{ApiError, ApiResult};
use axum::extract::Multipart;
use axum::http::HeaderMap;
use scorebook_core::pdf::PdfPayload;
use std::collections::HashMap;
use uuid::Uuid;

/// Header carrying the caller's user id for policy-gated mutations.
pub const CALLER_ID_HEADER: &str = "x-caller-id";

/// Extract the optional caller id. A present but malformed header is a
/// client error, not an anonymous caller.
pub fn caller_id(headers: &HeaderMap) -> ApiResult<Option<Uuid>> {
    match headers.get(CALLER_ID_HEADER) {
        None => Ok(None),
        Some(value) => {
            let raw = value
                .to_str()
                .map_err(|_| ApiError::BadRequest("invalid x-caller-id header".to_string()))?;
            let id = Uuid::parse_str(raw).map_err(|_| {
                ApiError::BadRequest(format!("invalid x-caller-id header: {raw}"))
            })?;
            Ok(Some(id))
        }
    }
}

/// A parsed multipart form: text fields plus at most one file part.
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<PdfPayload>,
}

impl MultipartForm {
    /// Take a required text field.
    pub fn require(&mut self, name: &str) -> ApiResult<String> {
        self.fields
            .remove(name)
            .ok_or_else(|| ApiError::BadRequest(format!("missing form field '{name}'")))
    }

    /// Take the file part, or fail.
    pub fn require_file(self) -> ApiResult<PdfPayload> {
        self.file
            .ok_or_else(|| ApiError::BadRequest("missing file part".to_string()))
    }
}

/// Drain a multipart body into text fields and an optional `file` part.
pub async fn read_form(mut multipart: Multipart) -> ApiResult<MultipartForm> {
    let mut fields = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("failed to read file part: {e}")))?;
            file = Some(PdfPayload {
                filename,
                content_type,
                data,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("failed to read field '{name}': {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(MultipartForm { fields, file })
}
