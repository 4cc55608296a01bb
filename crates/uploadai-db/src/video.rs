//! Video repository: inserts into the `videos` table.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres};
use uploadai_core::models::VideoRecord;
use uploadai_core::AppError;
use uuid::Uuid;

/// Persistence seam for upload metadata.
#[async_trait]
pub trait VideoRecordStore: Send + Sync {
    /// Insert one record for a stored file and return it as persisted.
    ///
    /// `name` is the client-supplied filename and `path` the absolute location on disk. The
    /// store assigns the id and creation time; `transcription` starts out empty.
    async fn create_video(&self, name: &str, path: &str) -> Result<VideoRecord, AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn health_check(&self) -> Result<(), AppError>;
}

/// Postgres-backed [`VideoRecordStore`].
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a video by id.
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        let video = sqlx::query_as::<Postgres, VideoRecord>(
            "SELECT id, name, path, transcription, created_at FROM videos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(video)
    }
}

#[async_trait]
impl VideoRecordStore for VideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "insert"))]
    async fn create_video(&self, name: &str, path: &str) -> Result<VideoRecord, AppError> {
        let video = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            INSERT INTO videos (id, name, path, transcription, created_at)
            VALUES ($1, $2, $3, NULL, $4)
            RETURNING id, name, path, transcription, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(path)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(video_id = %video.id, "Video record created");
        Ok(video)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
