//! Service health and statistics handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::db::UserRepository;
use crate::file::FileRepository;
use crate::web::dto::{StatsResponse, StatusResponse};
use crate::web::error::ApiError;

/// GET /health - Liveness check.
pub async fn health() -> &'static str {
    "OK"
}

/// GET /status - Whether the cache and the metadata store answer.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (cache, db) = tokio::join!(state.sessions.cache().is_alive(), state.db.is_alive());
    Json(StatusResponse { cache, db })
}

/// GET /stats - Number of users and file records.
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let users = UserRepository::new(state.db.pool()).count().await?;
    let files = FileRepository::new(state.db.pool()).count_all().await?;
    Ok(Json(StatsResponse { users, files }))
}
