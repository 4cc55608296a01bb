//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use uploadai_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "upload-ai API",
        version = "0.1.0",
        description = "Audio upload ingestion: multipart uploads are streamed to storage under a collision-free name and recorded for later transcription."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::health::liveness_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        models::VideoRecord,
        models::VideoUploadResponse,
        error::ErrorResponse,
        handlers::health::LivenessResponse,
        handlers::health::ReadinessResponse,
    )),
    tags(
        (name = "videos", description = "Upload ingestion"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
