//! Request DTOs for Web API.

use serde::{Deserialize, Deserializer};

use crate::auth::RegistrationRequest;
use crate::file::UploadRequest;

/// User registration request.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    /// Login email.
    #[serde(default)]
    pub email: Option<String>,
    /// Clear-text password.
    #[serde(default)]
    pub password: Option<String>,
}

impl From<CreateUserRequest> for RegistrationRequest {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// File creation request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// `folder`, `file` or `image`.
    #[serde(default, rename = "type")]
    pub file_type: Option<String>,
    /// Public flag.
    #[serde(default)]
    pub is_public: Option<bool>,
    /// Base64 payload.
    #[serde(default)]
    pub data: Option<String>,
    /// Parent folder id, as a string or a number.
    #[serde(default, deserialize_with = "id_or_string")]
    pub parent_id: Option<String>,
}

impl From<CreateFileRequest> for UploadRequest {
    fn from(req: CreateFileRequest) -> Self {
        Self {
            name: req.name,
            file_type: req.file_type,
            is_public: req.is_public,
            data: req.data,
            parent_id: req.parent_id,
        }
    }
}

/// Query parameters for listing files.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Parent folder id; root when absent.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Zero-based page number. Kept raw so bad input becomes page 0.
    #[serde(default)]
    pub page: Option<String>,
}

// Clients send the root sentinel as the number 0 and folder ids as strings.
fn id_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}
