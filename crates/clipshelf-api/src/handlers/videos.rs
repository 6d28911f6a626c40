use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use clipshelf_core::models::{collect_videos, PresignedUrlQuery};
use clipshelf_core::{AppError, PresignedUrlResponse, VideoListResponse};
use std::sync::Arc;
use std::time::Duration;

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Videos under the configured prefix", body = VideoListResponse),
        (status = 500, description = "Bucket is not configured", body = ErrorResponse),
        (status = 502, description = "Storage provider error", body = ErrorResponse)
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let storage = state.storage()?;
    let prefix = state.config.s3_prefix();

    let objects = storage.list_objects(prefix).await?;
    let total = objects.len();
    let videos = collect_videos(objects, prefix, state.config.video_extensions());

    tracing::debug!(
        bucket = %storage.bucket(),
        prefix = %prefix,
        objects = total,
        videos = videos.len(),
        "Listed videos"
    );

    Ok(Json(VideoListResponse { videos }))
}

#[utoipa::path(
    get,
    path = "/api/videos/url",
    tag = "videos",
    params(PresignedUrlQuery),
    responses(
        (status = 200, description = "Time-limited download URL", body = PresignedUrlResponse),
        (status = 400, description = "Missing key", body = ErrorResponse),
        (status = 500, description = "Bucket is not configured", body = ErrorResponse),
        (status = 502, description = "Storage provider error", body = ErrorResponse)
    )
)]
pub async fn get_video_url(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let query = PresignedUrlQuery::from_pairs(params);
    if query.key.is_empty() {
        return Err(AppError::BadRequest("key is required".to_string()).into());
    }
    let storage = state.storage()?;

    let expires_in = Duration::from_secs(state.config.url_expiry_secs());
    let url = storage.presigned_get_url(&query.key, expires_in).await?;

    tracing::debug!(
        bucket = %storage.bucket(),
        key = %query.key,
        expires_in_secs = expires_in.as_secs(),
        "Issued download URL"
    );

    Ok(Json(PresignedUrlResponse { url }))
}
