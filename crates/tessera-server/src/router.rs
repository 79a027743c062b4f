use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all Tessera endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/versions", post(handler::create_version_handler))
        .route("/v1/versions/:id", get(handler::get_version_handler))
        .route("/v1/versions/:id/content", get(handler::get_content_handler))
        .route("/v1/versions/:id/verify", get(handler::verify_version_handler))
        .route("/v1/documents/:id/versions", get(handler::list_versions_handler))
        .route("/v1/diff", get(handler::diff_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
