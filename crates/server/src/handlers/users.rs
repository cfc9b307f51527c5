//! User endpoints.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scorebook_catalog::{NewUser, ProfileUpdate, SheetView, UserProfileView, UserUpdate, UserView};
use scorebook_core::SortKey;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort_by: Option<String>,
}

impl SortQuery {
    pub fn sort_key(&self) -> SortKey {
        self.sort_by
            .as_deref()
            .map(SortKey::parse)
            .unwrap_or_default()
    }
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<AppState>,
    Json(new): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    let view = state.users.register(new).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserView>> {
    Ok(Json(state.users.get_user(user_id).await?))
}

/// `PUT /api/users/{id}`
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(update): Json<UserUpdate>,
) -> ApiResult<Json<UserView>> {
    Ok(Json(state.users.update_user(user_id, update).await?))
}

/// `DELETE /api/users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.users.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/users/{id}/profile`
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserProfileView>> {
    Ok(Json(state.users.get_profile(user_id).await?))
}

/// `PUT /api/users/{id}/profile`
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<UserView>> {
    Ok(Json(state.users.update_profile(user_id, update).await?))
}

/// `GET /api/users/{id}/sheets/public`
pub async fn user_public_sheets(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<SheetView>>> {
    let views = state
        .catalog
        .list_public_of_user(user_id, query.sort_key())
        .await?;
    Ok(Json(views))
}
