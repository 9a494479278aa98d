//! User registration.

use tracing::info;

use crate::auth::hash_password;
use crate::db::{DbPool, NewUser, User, UserRepository};
use crate::{FilesError, Result};

/// Registration request data.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    /// Login email.
    pub email: Option<String>,
    /// Clear-text password.
    pub password: Option<String>,
}

impl RegistrationRequest {
    /// Create a request with both fields present.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| FilesError::Validation(message.to_string()))
}

/// Register a new user.
///
/// Checks run in order: email present, password present, email unused.
/// The password is stored as an Argon2 hash.
pub async fn register(pool: &DbPool, request: &RegistrationRequest) -> Result<User> {
    let email = required(&request.email, "Missing email")?;
    let password = required(&request.password, "Missing password")?;

    let repo = UserRepository::new(pool);
    if repo.get_by_email(email).await?.is_some() {
        return Err(FilesError::Conflict("Already exist".to_string()));
    }

    let hash = hash_password(password)?;
    let user = repo.create(&NewUser::new(email, hash)).await?;

    info!(user_id = user.id, "User registered");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::db::Database;

    #[tokio::test]
    async fn test_register_success() {
        let db = Database::open_in_memory().await.unwrap();

        let user = register(
            db.pool(),
            &RegistrationRequest::new("alice@example.com", "secret"),
        )
        .await
        .unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password, "secret");
        assert!(verify_password("secret", &user.password).is_ok());
    }

    #[tokio::test]
    async fn test_register_missing_email_checked_first() {
        let db = Database::open_in_memory().await.unwrap();

        let result = register(db.pool(), &RegistrationRequest::default()).await;
        assert!(matches!(result, Err(FilesError::Validation(msg)) if msg == "Missing email"));
    }

    #[tokio::test]
    async fn test_register_missing_password() {
        let db = Database::open_in_memory().await.unwrap();
        let request = RegistrationRequest {
            email: Some("alice@example.com".to_string()),
            password: Some(String::new()),
        };

        let result = register(db.pool(), &request).await;
        assert!(matches!(result, Err(FilesError::Validation(msg)) if msg == "Missing password"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let db = Database::open_in_memory().await.unwrap();
        let request = RegistrationRequest::new("alice@example.com", "secret");
        register(db.pool(), &request).await.unwrap();

        let result = register(db.pool(), &request).await;
        assert!(matches!(result, Err(FilesError::Conflict(msg)) if msg == "Already exist"));
    }

    #[tokio::test]
    async fn test_register_email_case_sensitive() {
        let db = Database::open_in_memory().await.unwrap();
        register(
            db.pool(),
            &RegistrationRequest::new("alice@example.com", "secret"),
        )
        .await
        .unwrap();

        assert!(register(
            db.pool(),
            &RegistrationRequest::new("Alice@example.com", "secret"),
        )
        .await
        .is_ok());
    }
}
