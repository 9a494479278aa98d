//! API handlers.

pub mod app;
pub mod auth;
pub mod files;
pub mod users;

pub use app::*;
pub use auth::*;
pub use files::*;
pub use users::*;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::SessionStore;
use crate::cache::Cache;
use crate::config::Config;
use crate::db::Database;
use crate::file::{BlobStore, FileService};

/// Shared database handle.
pub type SharedDatabase = Arc<Database>;

/// Application state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Metadata store.
    pub db: SharedDatabase,
    /// Token sessions backed by the cache.
    pub sessions: SessionStore,
    /// File hierarchy service.
    pub files: FileService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: SharedDatabase, sessions: SessionStore, files: FileService) -> Self {
        Self {
            db,
            sessions,
            files,
        }
    }

    /// Wire the state from configuration and opened collaborators.
    pub fn from_config(config: &Config, db: Database, cache: Cache) -> Self {
        let db = Arc::new(db);
        let sessions = SessionStore::new(cache, Duration::from_secs(config.session.ttl_secs));
        let files = FileService::new(
            db.clone(),
            BlobStore::new(&config.files.folder_path),
            config.files.max_upload_size_bytes(),
        );
        Self::new(db, sessions, files)
    }
}
