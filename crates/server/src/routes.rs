//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Slack on top of the PDF limit for multipart framing and metadata fields.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = (state.config.files.max_pdf_size_bytes + MULTIPART_OVERHEAD) as usize;

    let user_routes = Router::new()
        .route("/api/users", post(handlers::create_user))
        .route(
            "/api/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/api/users/{id}/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route(
            "/api/users/{id}/sheets/public",
            get(handlers::user_public_sheets),
        );

    let sheet_routes = Router::new()
        .route("/api/sheets", post(handlers::create_sheet))
        // Static segments before the {id} routes
        .route("/api/sheets/public", get(handlers::list_public))
        .route("/api/sheets/search", get(handlers::search))
        .route("/api/sheets/search/advanced", get(handlers::advanced_search))
        .route("/api/sheets/recent", get(handlers::list_recent))
        .route("/api/sheets/genre/{genre}", get(handlers::list_by_genre))
        .route(
            "/api/sheets/instrument/{instrument}",
            get(handlers::list_by_instrument),
        )
        .route("/api/sheets/artist/{artist}", get(handlers::list_by_artist))
        .route("/api/sheets/filters/genres", get(handlers::list_genres))
        .route(
            "/api/sheets/filters/instruments",
            get(handlers::list_instruments),
        )
        .route("/api/sheets/filters/artists", get(handlers::list_artists))
        .route("/api/sheets/users/{id}/owned", get(handlers::list_owned))
        .route(
            "/api/sheets/users/{id}/favorites",
            get(handlers::list_favorites),
        )
        .route(
            "/api/sheets/{id}",
            get(handlers::get_sheet)
                .put(handlers::update_sheet)
                .delete(handlers::delete_sheet),
        )
        .route("/api/sheets/{id}/file", put(handlers::replace_file))
        .route("/api/sheets/{id}/pdf", get(handlers::get_pdf))
        .route(
            "/api/sheets/{id}/favorites",
            post(handlers::add_favorite).delete(handlers::remove_favorite),
        )
        .route("/api/sheets/{id}/is-favorite", get(handlers::is_favorite));

    let file_routes = Router::new()
        .route(
            "/api/files",
            post(handlers::upload_file).get(handlers::list_files),
        )
        .route(
            "/api/files/{*path}",
            get(handlers::download_file).delete(handlers::delete_file),
        );

    Router::new()
        // Health check (intentionally unauthenticated, for probes)
        .route("/api/health", get(handlers::health_check))
        .merge(user_routes)
        .merge(sheet_routes)
        .merge(file_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
