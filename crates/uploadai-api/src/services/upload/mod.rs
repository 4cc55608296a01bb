//! Upload ingestion pipeline

mod service;

pub use service::VideoUploadService;
