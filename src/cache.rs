//! Key-value cache with per-entry expiry.
//!
//! Backed by its own SQLite pool, in memory unless a path is configured, so
//! entries behave like a volatile cache and vanish on restart.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::db::{connect_file, connect_in_memory, DbPool};
use crate::Result;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS cache_entries (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    expires_at  INTEGER NOT NULL  -- unix epoch milliseconds
)";

/// Key-value cache client.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct Cache {
    pool: DbPool,
}

impl Cache {
    /// Open an in-memory cache.
    pub async fn open_in_memory() -> Result<Self> {
        Self::with_pool(connect_in_memory().await?).await
    }

    /// Open a cache persisted at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_pool(connect_file(path.as_ref(), 1).await?).await
    }

    async fn with_pool(pool: DbPool) -> Result<Self> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Get the live value stored under `key`.
    ///
    /// Expired entries are treated as absent.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar(
            "SELECT value FROM cache_entries WHERE key = ? AND expires_at > ?",
        )
        .bind(key)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at = now_millis().saturating_add(ttl_millis);

        sqlx::query(
            "INSERT INTO cache_entries (key, value, expires_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
        )
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete the entry under `key`.
    ///
    /// Returns `true` if a live entry was removed.
    pub async fn del(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cache_entries WHERE key = ? AND expires_at > ?")
            .bind(key)
            .bind(now_millis())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every expired entry.
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cache_entries WHERE expires_at <= ?")
            .bind(now_millis())
            .execute(&self.pool)
            .await?;
        debug!(removed = result.rows_affected(), "Purged expired cache entries");
        Ok(result.rows_affected())
    }

    /// Check that the cache answers a trivial query.
    pub async fn is_alive(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cache_entries")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }

    /// Close the cache pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
