#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::{S3Access, S3Storage};
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use clipshelf_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
///
/// Fails with `ConfigError` when no bucket is configured; callers decide
/// whether that is fatal.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let bucket = config
        .s3_bucket()
        .map(String::from)
        .ok_or_else(|| StorageError::ConfigError("S3_BUCKET is not configured".to_string()))?;

    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let access = S3Access::from_keys(config.aws_access_key_id(), config.aws_secret_access_key());
            let storage = S3Storage::new(
                bucket,
                config.aws_region().map(String::from),
                config.s3_endpoint().map(String::from),
                access,
            )
            .await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_storage_base_url()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path, bucket, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned()).expect("config")
    }

    #[tokio::test]
    async fn test_missing_bucket_is_config_error() {
        let config = config_from(&[]);
        let result = create_storage(&config).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[cfg(feature = "storage-local")]
    #[tokio::test]
    async fn test_local_backend() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().to_string_lossy().to_string();
        let config = config_from(&[
            ("STORAGE_BACKEND", "local"),
            ("S3_BUCKET", "media"),
            ("LOCAL_STORAGE_PATH", &path),
            ("LOCAL_STORAGE_BASE_URL", "http://localhost:8080/files"),
        ]);

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert_eq!(storage.bucket(), "media");
        assert!(temp_dir.path().join("media").is_dir());
    }

    #[cfg(feature = "storage-s3")]
    #[tokio::test]
    async fn test_s3_backend_anonymous() {
        let config = config_from(&[
            ("S3_BUCKET", "public-videos"),
            ("AWS_REGION", "us-west-2"),
        ]);

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::S3);
        let url = storage
            .presigned_get_url("clip.mp4", std::time::Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(url, "https://public-videos.s3.us-west-2.amazonaws.com/clip.mp4");
    }
}
