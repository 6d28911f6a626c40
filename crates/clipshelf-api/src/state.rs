//! Application state shared by all handlers.

use clipshelf_core::{AppError, Config};
use clipshelf_storage::Storage;
use std::sync::Arc;

/// Immutable per-process state: configuration plus the storage client built from it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no bucket is configured; bucket-backed endpoints then
    /// answer with a configuration error.
    pub storage: Option<Arc<dyn Storage>>,
}

impl AppState {
    pub fn new(config: Config, storage: Option<Arc<dyn Storage>>) -> Self {
        Self { config, storage }
    }

    /// Storage client, or the "bucket not configured" error.
    pub fn storage(&self) -> Result<&Arc<dyn Storage>, AppError> {
        self.storage
            .as_ref()
            .ok_or_else(AppError::bucket_not_configured)
    }
}
