//! Sheet endpoints: catalog listings, search, mutations and favorites.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{caller_id, read_form};
use crate::handlers::users::SortQuery;
use crate::state::AppState;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use scorebook_catalog::{NewSheet, SheetUpdate, SheetView};
use scorebook_core::{SearchCriteria, SortKey};
use serde::Deserialize;
use uuid::Uuid;

/// `POST /api/sheets` — multipart: metadata fields + `file` part.
pub async fn create_sheet(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SheetView>)> {
    let mut form = read_form(multipart).await?;

    let owner_raw = form.require("owner_id")?;
    let owner_id = Uuid::parse_str(&owner_raw)
        .map_err(|_| ApiError::BadRequest(format!("invalid owner_id: {owner_raw}")))?;

    let new = NewSheet {
        title: form.require("title")?,
        description: form.fields.remove("description"),
        artist: form.require("artist")?,
        genre: form.require("genre")?,
        instrument: form.require("instrument")?,
        is_public: form
            .fields
            .remove("is_public")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true),
    };
    let pdf = form.require_file()?;

    let view = state.catalog.create_sheet(new, owner_id, pdf).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /api/sheets/{id}`
pub async fn get_sheet(
    State(state): State<AppState>,
    Path(sheet_id): Path<Uuid>,
) -> ApiResult<Json<SheetView>> {
    Ok(Json(state.catalog.get_sheet(sheet_id).await?))
}

/// `PUT /api/sheets/{id}`
pub async fn update_sheet(
    State(state): State<AppState>,
    Path(sheet_id): Path<Uuid>,
    headers: HeaderMap,
    Json(update): Json<SheetUpdate>,
) -> ApiResult<Json<SheetView>> {
    let caller = caller_id(&headers)?;
    Ok(Json(
        state.catalog.update_sheet(sheet_id, update, caller).await?,
    ))
}

/// `DELETE /api/sheets/{id}`
pub async fn delete_sheet(
    State(state): State<AppState>,
    Path(sheet_id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let caller = caller_id(&headers)?;
    state.catalog.delete_sheet(sheet_id, caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/sheets/{id}/file` — multipart with a `file` part; the
/// replacement is validated like a fresh upload.
pub async fn replace_file(
    State(state): State<AppState>,
    Path(sheet_id): Path<Uuid>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<SheetView>> {
    let caller = caller_id(&headers)?;
    let form = read_form(multipart).await?;
    let pdf = form.require_file()?;
    Ok(Json(state.catalog.replace_pdf(sheet_id, pdf, caller).await?))
}

/// `GET /api/sheets/{id}/pdf` — the raw payload.
pub async fn get_pdf(
    State(state): State<AppState>,
    Path(sheet_id): Path<Uuid>,
) -> ApiResult<Response> {
    let pdf = state.catalog.get_sheet_pdf(sheet_id).await?;
    let disposition = format!("inline; filename=\"{}\"", pdf.filename);
    Ok((
        [
            (header::CONTENT_TYPE, pdf.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf.data,
    )
        .into_response())
}

/// `GET /api/sheets/public`
pub async fn list_public(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    Ok(Json(state.catalog.list_public(query.sort_key()).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub sort_by: Option<String>,
}

/// `GET /api/sheets/search?q=`
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    let sort = query
        .sort_by
        .as_deref()
        .map(SortKey::parse)
        .unwrap_or_default();
    Ok(Json(state.catalog.search(&query.q, sort).await?))
}

#[derive(Debug, Deserialize)]
pub struct AdvancedSearchQuery {
    pub search_term: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub instrument: Option<String>,
    pub sort_by: Option<String>,
}

/// `GET /api/sheets/search/advanced`
pub async fn advanced_search(
    State(state): State<AppState>,
    Query(query): Query<AdvancedSearchQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    let sort = query
        .sort_by
        .as_deref()
        .map(SortKey::parse)
        .unwrap_or_default();
    let criteria = SearchCriteria {
        search_term: query.search_term,
        artist: query.artist,
        genre: query.genre,
        instrument: query.instrument,
    };
    Ok(Json(state.catalog.advanced_search(criteria, sort).await?))
}

/// `GET /api/sheets/recent`
pub async fn list_recent(State(state): State<AppState>) -> ApiResult<Json<Vec<SheetView>>> {
    Ok(Json(state.catalog.list_recent().await?))
}

/// `GET /api/sheets/genre/{genre}`
pub async fn list_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    Ok(Json(
        state.catalog.list_by_genre(&genre, query.sort_key()).await?,
    ))
}

/// `GET /api/sheets/instrument/{instrument}`
pub async fn list_by_instrument(
    State(state): State<AppState>,
    Path(instrument): Path<String>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    Ok(Json(
        state
            .catalog
            .list_by_instrument(&instrument, query.sort_key())
            .await?,
    ))
}

/// `GET /api/sheets/artist/{artist}`
pub async fn list_by_artist(
    State(state): State<AppState>,
    Path(artist): Path<String>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    Ok(Json(
        state
            .catalog
            .list_by_artist(&artist, query.sort_key())
            .await?,
    ))
}

/// `GET /api/sheets/filters/genres`
pub async fn list_genres(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.catalog.genres().await?))
}

/// `GET /api/sheets/filters/instruments`
pub async fn list_instruments(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.catalog.instruments().await?))
}

/// `GET /api/sheets/filters/artists`
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.catalog.artists().await?))
}

/// `GET /api/sheets/users/{user_id}/owned`
pub async fn list_owned(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    Ok(Json(
        state
            .catalog
            .list_owned_by(user_id, query.sort_key())
            .await?,
    ))
}

/// `GET /api/sheets/users/{user_id}/favorites`
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    Ok(Json(
        state
            .catalog
            .list_favorites_of(user_id, query.sort_key())
            .await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// `POST /api/sheets/{sheet_id}/favorites?user_id=`
pub async fn add_favorite(
    State(state): State<AppState>,
    Path(sheet_id): Path<Uuid>,
    Query(query): Query<UserIdQuery>,
) -> ApiResult<StatusCode> {
    state.catalog.add_favorite(query.user_id, sheet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/sheets/{sheet_id}/favorites?user_id=`
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(sheet_id): Path<Uuid>,
    Query(query): Query<UserIdQuery>,
) -> ApiResult<StatusCode> {
    state
        .catalog
        .remove_favorite(query.user_id, sheet_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, serde::Serialize)]
pub struct IsFavoriteResponse {
    pub is_favorite: bool,
}

/// `GET /api/sheets/{sheet_id}/is-favorite?user_id=`
pub async fn is_favorite(
    State(state): State<AppState>,
    Path(sheet_id): Path<Uuid>,
    Query(query): Query<UserIdQuery>,
) -> ApiResult<Json<IsFavoriteResponse>> {
    let is_favorite = state.catalog.is_favorite(query.user_id, sheet_id).await?;
    Ok(Json(IsFavoriteResponse { is_favorite }))
}
