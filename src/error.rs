//! Error types for the files manager.

use thiserror::Error;

use crate::auth::PasswordError;

/// Common error type for the files manager.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Database error.
    ///
    /// Wraps failures from either the metadata store or the session cache.
    /// Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing, invalid or expired session token.
    #[error("unauthorized")]
    Unauthorized,

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested parent record does not exist.
    #[error("parent not found")]
    ParentNotFound,

    /// The requested parent record exists but is not a folder.
    #[error("parent is not a folder")]
    ParentNotFolder,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Password hashing error.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for FilesError {
    fn from(e: sqlx::Error) -> Self {
        FilesError::Database(e.to_string())
    }
}

/// Result type alias for files manager operations.
pub type Result<T> = std::result::Result<T, FilesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = FilesError::Validation("Missing name".to_string());
        assert_eq!(err.to_string(), "validation error: Missing name");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = FilesError::NotFound("file".to_string());
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn test_parent_errors_display() {
        assert_eq!(FilesError::ParentNotFound.to_string(), "parent not found");
        assert_eq!(
            FilesError::ParentNotFolder.to_string(),
            "parent is not a folder"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FilesError = io_err.into();
        assert!(matches!(err, FilesError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: FilesError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, FilesError::Database(_)));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(FilesError::Unauthorized)
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
