use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Metadata row describing an ingested upload.
///
/// `transcription` is reserved for a later processing stage and is always `None` when the
/// record is first created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    /// Filename as supplied by the client. Not unique.
    pub name: String,
    /// Absolute location of the stored file.
    pub path: String,
    pub transcription: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VideoRecord {
    /// Build a fresh record for a file that has just been written.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            path: path.into(),
            transcription: None,
            created_at: Utc::now(),
        }
    }
}

/// Body of a successful `POST /videos`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoUploadResponse {
    pub video: VideoRecord,
}

impl From<VideoRecord> for VideoUploadResponse {
    fn from(video: VideoRecord) -> Self {
        VideoUploadResponse { video }
    }
}
