//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use clipshelf_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clipshelf API",
        version = "0.1.0",
        description = "Lists videos in an object-storage bucket and issues time-limited download URLs"
    ),
    paths(
        handlers::videos::list_videos,
        handlers::videos::get_video_url,
        handlers::health::liveness_check,
    ),
    components(
        schemas(
            models::VideoDescriptor,
            models::VideoListResponse,
            models::PresignedUrlResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video listing and download URLs"),
        (name = "config", description = "Service health checks")
    )
)]
pub struct ApiDoc;
