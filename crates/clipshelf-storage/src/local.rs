use crate::keys::{encode_key, validate_key};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::{StorageBackend, StoredObject};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Local filesystem storage implementation
///
/// A bucket is a directory under `base_path`; object keys are file paths
/// relative to it. URLs point at `base_url`, which is expected to be served
/// by something else (a static file server or CDN).
#[derive(Clone)]
pub struct LocalStorage {
    bucket_path: PathBuf,
    bucket: String,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding bucket directories (e.g., "/var/lib/clipshelf")
    /// * `bucket` - Bucket directory name under `base_path`
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8080/files")
    pub async fn new(
        base_path: impl Into<PathBuf>,
        bucket: String,
        base_url: String,
    ) -> StorageResult<Self> {
        validate_key(&bucket)
            .map_err(|_| StorageError::ConfigError(format!("Invalid bucket name: {}", bucket)))?;

        let bucket_path = base_path.into().join(&bucket);

        fs::create_dir_all(&bucket_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                bucket_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            bucket_path,
            bucket,
            base_url,
        })
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bucket,
            encode_key(key)
        )
    }

    /// Walk the bucket directory and collect every regular file as a key.
    async fn walk(&self) -> std::io::Result<Vec<StoredObject>> {
        let mut objects = Vec::new();
        let mut pending: Vec<PathBuf> = vec![self.bucket_path.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() {
                    if let Some(key) = self.path_to_key(&path) {
                        let size = entry.metadata().await?.len();
                        objects.push(StoredObject::new(key, size as i64));
                    }
                }
            }
        }

        Ok(objects)
    }

    fn path_to_key(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.bucket_path).ok()?;
        let segments: Option<Vec<&str>> = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect();
        segments.map(|segments| segments.join("/"))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        let start = std::time::Instant::now();

        let mut objects = self.walk().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                prefix = %prefix,
                "Local list failed"
            );
            StorageError::ListFailed(e.to_string())
        })?;

        objects.retain(|obj| obj.key.starts_with(prefix));
        // Same lexicographic order S3 returns keys in
        objects.sort_by(|a, b| a.key.cmp(&b.key));

        tracing::debug!(
            bucket = %self.bucket,
            prefix = %prefix,
            count = objects.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local list successful"
        );

        Ok(objects)
    }

    /// The `expires` query parameter is advisory: nothing here enforces it,
    /// so the URL stays valid for as long as `base_url` serves the file.
    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;

        let expires_in = chrono::Duration::from_std(expires_in)
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;
        let expires_at = chrono::Utc::now()
            .checked_add_signed(expires_in)
            .ok_or_else(|| StorageError::PresignFailed("Expiry is out of range".to_string()))?;

        Ok(format!(
            "{}?expires={}",
            self.generate_url(storage_key),
            expires_at.timestamp()
        ))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
