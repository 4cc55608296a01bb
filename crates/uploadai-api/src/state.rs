//! Shared application state handed to every handler.

use std::sync::Arc;
use uploadai_core::Config;
use uploadai_db::VideoRecordStore;
use uploadai_storage::Storage;

pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub store: Arc<dyn VideoRecordStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        store: Arc<dyn VideoRecordStore>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            storage,
            store,
        })
    }
}
