use crate::keys::encode_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::{StorageBackend, StoredObject};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use std::fmt;
use std::time::Duration;

/// Region used when neither configuration nor the SDK provider chain has one.
const DEFAULT_REGION: &str = "us-east-1";

/// How requests to the bucket are authenticated, chosen once at construction.
#[derive(Clone)]
pub enum S3Access {
    /// Unsigned requests; only works against publicly readable buckets.
    Anonymous,
    /// Requests signed with a static key pair.
    Credentialed {
        access_key_id: String,
        secret_access_key: String,
    },
}

impl S3Access {
    /// Anonymous only when neither half of the key pair is present.
    pub fn from_keys(access_key_id: Option<&str>, secret_access_key: Option<&str>) -> Self {
        match (access_key_id, secret_access_key) {
            (None, None) => S3Access::Anonymous,
            (access_key_id, secret_access_key) => S3Access::Credentialed {
                access_key_id: access_key_id.unwrap_or_default().to_string(),
                secret_access_key: secret_access_key.unwrap_or_default().to_string(),
            },
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, S3Access::Anonymous)
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for S3Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            S3Access::Anonymous => write!(f, "Anonymous"),
            S3Access::Credentialed { access_key_id, .. } => f
                .debug_struct("Credentialed")
                .field("access_key_id", access_key_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Public URL of an object, used when requests cannot be signed.
///
/// For AWS S3: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
/// With a custom endpoint, path-style: `{endpoint}/{bucket}/{key}`.
pub fn public_object_url(endpoint_url: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    let key = encode_key(key);
    match endpoint_url {
        Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    access: S3Access,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region; falls back to the SDK provider chain, then `us-east-1`
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `access` - Anonymous or credentialed requests
    pub async fn new(
        bucket: String,
        region: Option<String>,
        endpoint_url: Option<String>,
        access: S3Access,
    ) -> StorageResult<Self> {
        if bucket.trim().is_empty() {
            return Err(StorageError::ConfigError(
                "S3 bucket name is empty".to_string(),
            ));
        }

        let region_provider = RegionProviderChain::first_try(region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);
        let loader = match &access {
            S3Access::Anonymous => loader.no_credentials(),
            S3Access::Credentialed {
                access_key_id,
                secret_access_key,
            } => loader.credentials_provider(Credentials::new(
                access_key_id.clone(),
                secret_access_key.clone(),
                None,
                None,
                "clipshelf-config",
            )),
        };
        let sdk_config = loader.load().await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(ref endpoint) = endpoint_url {
            // Path-style addressing is required by MinIO and most S3-compatible providers
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint)
                .force_path_style(true);
        }
        let client = Client::from_conf(s3_config_builder.build());

        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        tracing::debug!(
            bucket = %bucket,
            region = %region,
            endpoint = ?endpoint_url,
            access = ?access,
            "S3 client configured"
        );

        Ok(S3Storage {
            client,
            bucket,
            region,
            endpoint_url,
            access,
        })
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        let start = std::time::Instant::now();

        let mut request = self.client.list_objects_v2().bucket(&self.bucket);
        if !prefix.is_empty() {
            request = request.prefix(prefix);
        }

        let mut pages = request.into_paginator().send();
        let mut objects = Vec::new();
        let mut page_count = 0usize;

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %message,
                    bucket = %self.bucket,
                    prefix = %prefix,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 list failed"
                );
                StorageError::ListFailed(message)
            })?;
            page_count += 1;

            for object in page.contents() {
                let Some(key) = object.key().filter(|k| !k.is_empty()) else {
                    continue;
                };
                objects.push(StoredObject::new(key, object.size().unwrap_or(0)));
            }
        }

        tracing::info!(
            bucket = %self.bucket,
            prefix = %prefix,
            count = objects.len(),
            pages = page_count,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 list successful"
        );

        Ok(objects)
    }

    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if self.access.is_anonymous() {
            return Ok(public_object_url(
                self.endpoint_url.as_deref(),
                &self.bucket,
                &self.region,
                storage_key,
            ));
        }

        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::PresignFailed(DisplayErrorContext(&e).to_string()))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %message,
                    bucket = %self.bucket,
                    key = %storage_key,
                    "S3 presign failed"
                );
                StorageError::PresignFailed(message)
            })?;

        Ok(presigned_request.uri().to_string())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
