//! File hierarchy handlers.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::file::parse_page;
use crate::web::dto::{ApiJson, CreateFileRequest, FileResponse, ListFilesQuery};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, OptionalAuthUser};

/// POST /files - Create a folder, file or image.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateFileRequest>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let record = state.files.create(auth.user_id, &req.into()).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /files/:id - One record owned by the caller.
pub async fn show(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state.files.get(auth.user_id, &id).await?;
    Ok(Json(record.into()))
}

/// GET /files - One page of the caller's records under a parent.
pub async fn index(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let page = parse_page(query.page.as_deref());
    let records = state
        .files
        .list(auth.user_id, query.parent_id.as_deref(), page)
        .await?;

    Ok(Json(records.into_iter().map(FileResponse::from).collect()))
}

/// GET /files/:id/data - Raw blob content.
pub async fn data(
    State(state): State<Arc<AppState>>,
    viewer: OptionalAuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let blob = state.files.read_data(viewer.user_id(), &id).await?;

    let content_type = mime_guess::from_path(&blob.record.name)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, blob.content.len())
        .body(Body::from(blob.content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal()
        })
}
