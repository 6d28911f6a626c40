//! Storage setup and initialization

use anyhow::Result;
use clipshelf_core::Config;
use clipshelf_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the storage client once for the whole process.
///
/// Without a bucket the server still starts; the video endpoints then report
/// the missing setting on every request.
pub async fn setup_storage(config: &Config) -> Result<Option<Arc<dyn Storage>>> {
    if config.s3_bucket().is_none() {
        tracing::warn!("S3_BUCKET is not configured; video endpoints will return errors");
        return Ok(None);
    }

    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = %storage.bucket(),
        prefix = %config.s3_prefix(),
        anonymous = config.aws_access_key_id().is_none() && config.aws_secret_access_key().is_none(),
        "Storage abstraction initialized successfully"
    );

    Ok(Some(storage))
}
