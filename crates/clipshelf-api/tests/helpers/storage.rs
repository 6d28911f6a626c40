use async_trait::async_trait;
use clipshelf_storage::{Storage, StorageBackend, StorageError, StorageResult, StoredObject};
use std::time::Duration;

/// In-memory storage with a fixed listing and deterministic URLs.
pub struct FakeStorage {
    pub bucket: String,
    pub objects: Vec<StoredObject>,
}

impl FakeStorage {
    pub fn new(bucket: &str, objects: Vec<StoredObject>) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects,
        }
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        Ok(self
            .objects
            .iter()
            .filter(|obj| obj.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "https://fake.storage/{}/{}?X-Amz-Expires={}",
            self.bucket,
            storage_key,
            expires_in.as_secs()
        ))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Storage whose every call fails the way an unreachable provider would.
pub struct FailingStorage {
    pub message: String,
}

impl FailingStorage {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn list_objects(&self, _prefix: &str) -> StorageResult<Vec<StoredObject>> {
        Err(StorageError::ListFailed(self.message.clone()))
    }

    async fn presigned_get_url(
        &self,
        _storage_key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::PresignFailed(self.message.clone()))
    }

    fn bucket(&self) -> &str {
        "broken"
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
