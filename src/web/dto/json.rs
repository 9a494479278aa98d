//! JSON body extraction for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

use crate::web::error::ApiError;

/// A JSON extractor that answers malformed bodies with an [`ApiError`].
///
/// Axum's own `Json` rejects with a plain-text body; this keeps every error
/// response in the structured shape.
///
/// # Example
///
/// ```ignore
/// use files_manager::web::dto::ApiJson;
///
/// async fn create_user(ApiJson(payload): ApiJson<CreateUserRequest>) -> ... {
///     // payload is already deserialized
/// }
/// ```
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    ApiError::bad_request("File too large")
                } else {
                    ApiError::bad_request(format!("Invalid JSON: {}", e.body_text()))
                }
            })?;

        Ok(ApiJson(value))
    }
}
