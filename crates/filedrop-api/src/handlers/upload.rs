use crate::error::HttpAppError;
use crate::services::upload::UploadService;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// `POST /upload`: validate one multipart file and forward it to storage.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let multipart = multipart?;
    let response = UploadService::new(&state.upload).upload(multipart).await?;
    Ok(Json(response))
}
