//! Router configuration for the HTTP API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::error::{method_not_allowed, not_found};
use super::handlers::{download_file, index_page, list_files, upload_file, AppState};
use super::openapi::ApiDoc;

/// Create the main router.
///
/// Every route answers methods it does not serve with a 405 JSON error,
/// and unknown paths get a 404 JSON error.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_page).fallback(method_not_allowed))
        .route(
            "/upload",
            post(upload_file)
                .fallback(method_not_allowed)
                // Uploads are streamed to disk, so no body limit applies.
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/files", get(list_files).fallback(method_not_allowed))
        .route("/download/", get(download_file).fallback(method_not_allowed))
        .route(
            "/download/*filename",
            get(download_file).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Create a router serving the static front-end assets under `/static`.
pub fn create_static_router(static_dir: impl AsRef<Path>) -> Router {
    Router::new().nest_service("/static", ServeDir::new(static_dir))
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router exposing the OpenAPI description of the API.
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
