//! Test helpers: build AppState and router for integration tests.
//!
//! Storage is a real `LocalStorage` in a temp dir; the metadata store is an in-memory double,
//! so these tests need neither Docker nor Postgres.

use async_trait::async_trait;
use axum_test::TestServer;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uploadai_api::setup::routes;
use uploadai_api::AppState;
use uploadai_core::models::VideoRecord;
use uploadai_core::{AppError, Config, UploadConfig};
use uploadai_db::VideoRecordStore;
use uploadai_storage::{LocalStorage, Storage};

/// Records every created video; inserts fail while `failing` is set.
#[derive(Default)]
pub struct InMemoryVideoStore {
    records: Mutex<Vec<VideoRecord>>,
    failing: AtomicBool,
}

impl InMemoryVideoStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        store
    }

    #[allow(dead_code)]
    pub fn records(&self) -> Vec<VideoRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoRecordStore for InMemoryVideoStore {
    async fn create_video(&self, name: &str, path: &str) -> Result<VideoRecord, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let record = VideoRecord::new(name, path);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

/// Test application: server plus handles on everything behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<LocalStorage>,
    pub store: Arc<InMemoryVideoStore>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.storage.root().to_path_buf()
    }

    /// File names currently in the upload directory.
    #[allow(dead_code)]
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .expect("upload dir is readable")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn create_test_config(upload: UploadConfig) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        database_url: "postgres://unused@localhost/unused".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 1,
        upload,
    }
}

/// Setup test app with default upload settings.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}, InMemoryVideoStore::default()).await
}

/// Setup test app, letting the caller adjust upload settings and pick the store.
pub async fn setup_test_app_with<F>(configure: F, store: InMemoryVideoStore) -> TestApp
where
    F: FnOnce(&mut UploadConfig),
{
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let mut upload = UploadConfig {
        upload_dir: temp_dir.path().join("uploads"),
        ..UploadConfig::default()
    };
    configure(&mut upload);

    let storage = Arc::new(
        LocalStorage::new(&upload.upload_dir)
            .await
            .expect("Failed to create local storage"),
    );
    let store = Arc::new(store);

    let config = create_test_config(upload);
    let state = AppState::new(config.clone(), storage.clone(), store.clone());
    let app = routes::setup_routes(&config, state).expect("Failed to build router");

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        store,
        _temp_dir: temp_dir,
    }
}
