//! API error handling.
//!
//! Every failed request gets a JSON body of the form
//!
//! ```json
//! { "error": { "code": "BAD_REQUEST", "message": "Missing name" } }
//! ```
//!
//! Clients read the human-readable text from `error.message`; `error.code`
//! mirrors the HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::FilesError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Not found (404).
    NotFound,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::Unauthorized, "Unauthorized")
    }

    /// Create a not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound, "Not found")
    }

    /// Create an internal server error.
    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "An internal error occurred")
    }

    /// Error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<FilesError> for ApiError {
    fn from(err: FilesError) -> Self {
        match err {
            FilesError::Unauthorized => ApiError::unauthorized(),
            FilesError::Validation(msg) | FilesError::Conflict(msg) => ApiError::bad_request(msg),
            FilesError::ParentNotFound => ApiError::bad_request("Parent not found"),
            FilesError::ParentNotFolder => ApiError::bad_request("Parent is not a folder"),
            FilesError::NotFound(_) => ApiError::not_found(),
            err => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_files_error() {
        let cases = [
            (FilesError::Unauthorized, ErrorCode::Unauthorized, "Unauthorized"),
            (
                FilesError::Validation("Missing name".to_string()),
                ErrorCode::BadRequest,
                "Missing name",
            ),
            (
                FilesError::Conflict("Already exist".to_string()),
                ErrorCode::BadRequest,
                "Already exist",
            ),
            (
                FilesError::ParentNotFound,
                ErrorCode::BadRequest,
                "Parent not found",
            ),
            (
                FilesError::ParentNotFolder,
                ErrorCode::BadRequest,
                "Parent is not a folder",
            ),
            (
                FilesError::NotFound("File".to_string()),
                ErrorCode::NotFound,
                "Not found",
            ),
        ];

        for (err, code, message) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.code(), code);
            assert_eq!(api.message(), message);
        }
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let api = ApiError::from(FilesError::Database("disk I/O error at /var/db".to_string()));
        assert_eq!(api.code(), ErrorCode::InternalError);
        assert_eq!(api.message(), "An internal error occurred");
    }
}
