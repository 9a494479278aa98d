//! Session handlers.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use super::AppState;
use crate::auth::{login, logout};
use crate::web::dto::TokenResponse;
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /connect - Exchange Basic credentials for a session token.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let TypedHeader(Authorization(basic)) = credentials.ok_or_else(ApiError::unauthorized)?;

    let token = login(
        state.db.pool(),
        &state.sessions,
        basic.username(),
        basic.password(),
    )
    .await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - Close the current session.
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    logout(&state.sessions, &auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
