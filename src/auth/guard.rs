//! Authorization guard.

use crate::auth::SessionStore;
use crate::{FilesError, Result};

/// Resolve the caller's token to a user id.
///
/// A missing token, an unknown token and an expired token all fail with
/// [`FilesError::Unauthorized`]. Cache failures propagate unchanged.
pub async fn authenticate(sessions: &SessionStore, token: Option<&str>) -> Result<i64> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(FilesError::Unauthorized)?;

    sessions
        .resolve(token)
        .await?
        .ok_or(FilesError::Unauthorized)
}
