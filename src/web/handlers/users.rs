//! User handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::AppState;
use crate::auth::register;
use crate::db::UserRepository;
use crate::web::dto::{ApiJson, CreateUserRequest, UserResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /users - Register a new user.
pub async fn post_new(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = register(state.db.pool(), &req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/me - The user behind the session token.
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    // A session can outlive its user only if the user row was removed by hand.
    let user = UserRepository::new(state.db.pool())
        .get_by_id(auth.user_id)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    Ok(Json(user.into()))
}
