//! Standalone file upload endpoints, backed by the object store.

use crate::error::ApiResult;
use crate::handlers::common::read_form;
use crate::state::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use scorebook_core::pdf::validate_pdf;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub size: u64,
}

/// `POST /api/files` — multipart upload of a standalone PDF, stored under
/// its filename.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let form = read_form(multipart).await?;
    let pdf = form.require_file()?;
    validate_pdf(&pdf, state.config.files.max_pdf_size_bytes)?;

    let key = pdf.filename.clone();
    let size = pdf.data.len() as u64;
    state.storage.put(&key, pdf.data).await?;

    Ok((StatusCode::CREATED, Json(UploadResponse { key, size })))
}

/// `GET /api/files`
pub async fn list_files(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.storage.list("").await?))
}

/// `GET /api/files/{*path}`
pub async fn download_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Response> {
    let data = state.storage.get(&path).await?;
    let disposition = format!("attachment; filename=\"{path}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

/// `DELETE /api/files/{*path}`
pub async fn delete_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<StatusCode> {
    state.storage.delete(&path).await?;
    Ok(StatusCode::NO_CONTENT)
}
