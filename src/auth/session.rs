//! Session store, login and logout.
//!
//! A session is a cache entry `auth_<token> -> user id` with a finite
//! lifetime. The cache is the only source of truth for authentication.

use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{verify_password, PasswordError};
use crate::cache::Cache;
use crate::db::{DbPool, UserRepository};
use crate::{FilesError, Result};

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Prefix of every session key in the cache.
pub const AUTH_KEY_PREFIX: &str = "auth_";

/// Maps opaque tokens to user ids through the key-value cache.
#[derive(Debug, Clone)]
pub struct SessionStore {
    cache: Cache,
    ttl: Duration,
}

impl SessionStore {
    /// Create a session store over `cache` issuing sessions that live for `ttl`.
    pub fn new(cache: Cache, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// The underlying cache client.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    fn key(token: &str) -> String {
        format!("{AUTH_KEY_PREFIX}{token}")
    }

    /// Create a session for `user_id` and return its token.
    pub async fn create(&self, user_id: i64) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        self.cache
            .set(&Self::key(&token), &user_id.to_string(), self.ttl)
            .await?;
        Ok(token)
    }

    /// Resolve a token to its user id.
    ///
    /// Missing and expired sessions both yield `None`. A stored value that is
    /// not a user id is treated as missing.
    pub async fn resolve(&self, token: &str) -> Result<Option<i64>> {
        let value = self.cache.get(&Self::key(token)).await?;
        Ok(value.and_then(|v| v.parse().ok()))
    }

    /// Delete a session. Returns `true` if it existed.
    pub async fn revoke(&self, token: &str) -> Result<bool> {
        self.cache.del(&Self::key(token)).await
    }
}

/// Verify credentials and open a session.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    pool: &DbPool,
    sessions: &SessionStore,
    email: &str,
    password: &str,
) -> Result<String> {
    let user = UserRepository::new(pool)
        .get_by_email(email)
        .await?
        .ok_or(FilesError::Unauthorized)?;

    match verify_password(password, &user.password) {
        Ok(()) => {}
        Err(PasswordError::VerificationFailed) => {
            debug!(user_id = user.id, "Login rejected: wrong password");
            return Err(FilesError::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    }

    let token = sessions.create(user.id).await?;
    info!(user_id = user.id, "User logged in");
    Ok(token)
}

/// Close the session identified by `token`.
pub async fn logout(sessions: &SessionStore, token: &str) -> Result<()> {
    if sessions.revoke(token).await? {
        info!("Session closed");
        Ok(())
    } else {
        Err(FilesError::Unauthorized)
    }
}
