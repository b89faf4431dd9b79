//! Application state shared by every module

use sea_orm::DatabaseConnection;

use crate::infrastructure::config::StorageConfig;
use crate::infrastructure::emitter::Emitter;
use crate::infrastructure::storage::ActiveStorage;

/// Cloned into each module when its routes are built
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub emitter: Emitter,
    pub storage: ActiveStorage,
    /// Upload limit applied to the icon routes
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(db: DatabaseConnection, storage_config: StorageConfig) -> Self {
        let max_upload_bytes = storage_config.max_upload_bytes;
        let storage = ActiveStorage::new(db.clone(), storage_config);

        Self {
            db,
            emitter: Emitter::new(),
            storage,
            max_upload_bytes,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
