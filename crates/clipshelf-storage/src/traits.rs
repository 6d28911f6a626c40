//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::{StorageBackend, StoredObject};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// A backend is bound to one bucket at construction time. Handlers only ever
/// list and sign, so that is all the trait exposes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// List every object whose key starts with `prefix`, across all pages,
    /// in the order the backend enumerates them.
    async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<StoredObject>>;

    /// Generate a time-limited URL for a direct GET of `storage_key`.
    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Bucket this backend is bound to
    fn bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
