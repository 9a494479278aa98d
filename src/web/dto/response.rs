//! Response DTOs for Web API.

use serde::Serialize;

use crate::db::User;
use crate::file::{FileRecord, FileType, ParentRef};

/// User response.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: String,
    /// Login email.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Session token for the `X-Token` header.
    pub token: String,
}

/// File record response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// Record ID.
    pub id: String,
    /// Owner ID.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Record kind.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Public flag.
    pub is_public: bool,
    /// Parent folder id, or `0` for root.
    pub parent_id: ParentRef,
    /// Blob location. Absent for folders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            name: record.name,
            file_type: record.file_type,
            is_public: record.is_public,
            parent_id: record.parent,
            local_path: record.local_path,
        }
    }
}

/// Collaborator health.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Session cache reachable.
    pub cache: bool,
    /// Metadata store reachable.
    pub db: bool,
}

/// Record counts.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Registered users.
    pub users: i64,
    /// File records of every kind.
    pub files: i64,
}
