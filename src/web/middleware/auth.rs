//! Session token authentication.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::authenticate;
use crate::web::error::{ApiError, ErrorCode};
use crate::web::handlers::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

fn token_from_parts(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Extractor for authenticated users.
///
/// Rejects with 401 when the token is missing, unknown or expired. Place it
/// before any body extractor so the guard runs first.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Authenticated user ID.
    pub user_id: i64,
    /// Token the request was authenticated with.
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts);
        let user_id = authenticate(&state.sessions, token.as_deref()).await?;

        Ok(AuthUser {
            user_id,
            token: token.unwrap_or_default(),
        })
    }
}

/// Extractor for optionally authenticated users.
///
/// A missing or invalid token yields `None`; cache failures still reject.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    /// Authenticated user ID, if any.
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.user_id)
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuthUser(Some(user))),
            Err(e) if e.code() == ErrorCode::Unauthorized => {
                Ok(OptionalAuthUser(None))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilesError;
    use axum::http::Request;

    fn parts_with(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/files");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_token_from_parts() {
        assert_eq!(
            token_from_parts(&parts_with(&[("X-Token", "abc")])),
            Some("abc".to_string())
        );
        assert_eq!(token_from_parts(&parts_with(&[])), None);
    }

    #[test]
    fn test_unauthorized_maps_to_401_code() {
        let err = ApiError::from(FilesError::Unauthorized);
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
