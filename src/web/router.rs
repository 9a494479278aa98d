//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    connect, data, disconnect, health, index, me, post_new, show, stats, status, upload, AppState,
};
use super::middleware::create_cors_layer;
use crate::config::WebConfig;

/// Request body cap for a given decoded upload limit.
///
/// Base64 grows payloads by a third; the rest leaves room for the JSON
/// envelope.
pub fn body_limit_for(max_upload_size: u64) -> usize {
    let encoded = max_upload_size.div_ceil(3).saturating_mul(4);
    usize::try_from(encoded)
        .unwrap_or(usize::MAX)
        .saturating_add(64 * 1024)
}

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, web_config: &WebConfig) -> Router {
    let body_limit = body_limit_for(app_state.files.max_upload_size());

    let user_routes = Router::new()
        .route("/users", post(post_new))
        .route("/users/me", get(me));

    let session_routes = Router::new()
        .route("/connect", get(connect))
        .route("/disconnect", get(disconnect));

    let file_routes = Router::new()
        .route("/files", post(upload).get(index))
        .route("/files/:id", get(show))
        .route("/files/:id/data", get(data));

    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/stats", get(stats))
        .merge(user_routes)
        .merge(session_routes)
        .merge(file_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&web_config.cors_origins))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}
