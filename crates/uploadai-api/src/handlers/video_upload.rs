use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::VideoUploadService;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;
use uploadai_core::models::VideoUploadResponse;
use uploadai_core::AppError;

#[utoipa::path(
    post,
    path = "/videos",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored and recorded", body = VideoUploadResponse),
        (status = 400, description = "Missing file or unsupported extension", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_video"))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoUploadResponse>, HttpAppError> {
    // A body that is not multipart at all has no file part either.
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Request body is not multipart");
        AppError::MissingFile
    })?;

    let video = VideoUploadService::new(&state).upload(multipart).await?;

    Ok(Json(VideoUploadResponse::from(video)))
}
