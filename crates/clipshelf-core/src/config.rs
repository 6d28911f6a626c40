//! Configuration module
//!
//! Settings are read once at startup into an immutable [`Config`] which the API
//! shares with every handler. Empty variables count as unset.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 5000;
const URL_EXPIRY_SECS: u64 = 3600;
/// SigV4 presigned URLs cannot outlive one week.
const MAX_URL_EXPIRY_SECS: u64 = 7 * 24 * 3600;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Process-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub debug: bool,
    pub cors_origins: Vec<String>,
    pub http_concurrency_limit: usize,
}

/// Object storage settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: Option<String>,
    /// Always empty or ending in `/`, see [`normalize_prefix`].
    pub prefix: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, R2, etc.)
    pub url_expiry_secs: u64,
    /// Lowercase, without leading dot.
    pub video_extensions: Vec<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
}

/// Trim a raw prefix and make sure a non-empty one ends with `/`.
pub fn normalize_prefix(raw: &str) -> String {
    let prefix = raw.trim();
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{}/", prefix)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Load configuration from the process environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            environment,
            debug: var("DEBUG")
                .or_else(|| var("FLASK_DEBUG"))
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            cors_origins: parse_list(&var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string())),
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        };

        let backend = match var("STORAGE_BACKEND") {
            Some(s) => s.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let video_extensions = parse_list(&var("VIDEO_EXTENSIONS").unwrap_or_else(|| "mp4".to_string()))
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        let storage = StorageConfig {
            backend,
            bucket: var("S3_BUCKET").map(|s| s.trim().to_string()),
            prefix: normalize_prefix(&var("S3_PREFIX").unwrap_or_default()),
            access_key_id: var("AWS_ACCESS_KEY_ID"),
            secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
            region: var("AWS_REGION").or_else(|| var("S3_REGION")),
            endpoint: var("S3_ENDPOINT_URL").or_else(|| var("S3_ENDPOINT")),
            url_expiry_secs: match var("S3_URL_EXPIRY_SECONDS") {
                Some(secs) => secs.trim().parse().map_err(|_| {
                    anyhow::anyhow!("S3_URL_EXPIRY_SECONDS must be a valid number of seconds")
                })?,
                None => URL_EXPIRY_SECS,
            },
            video_extensions,
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
        };

        Ok(Config { base, storage })
    }

    /// Check cross-field constraints. A missing bucket is allowed here; the API
    /// reports it per request.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let storage = &self.storage;

        if storage.url_expiry_secs == 0 || storage.url_expiry_secs > MAX_URL_EXPIRY_SECS {
            return Err(anyhow::anyhow!(
                "S3_URL_EXPIRY_SECONDS must be between 1 and {}",
                MAX_URL_EXPIRY_SECS
            ));
        }

        if storage.access_key_id.is_some() != storage.secret_access_key.is_some() {
            return Err(anyhow::anyhow!(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"
            ));
        }

        if storage.backend == StorageBackend::Local
            && (storage.local_storage_path.is_none() || storage.local_storage_base_url.is_none())
        {
            return Err(anyhow::anyhow!(
                "STORAGE_BACKEND=local requires LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL"
            ));
        }

        if storage.video_extensions.is_empty() {
            return Err(anyhow::anyhow!("VIDEO_EXTENSIONS must list at least one extension"));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn debug(&self) -> bool {
        self.base.debug
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.storage.bucket.as_deref()
    }

    pub fn s3_prefix(&self) -> &str {
        &self.storage.prefix
    }

    pub fn aws_access_key_id(&self) -> Option<&str> {
        self.storage.access_key_id.as_deref()
    }

    pub fn aws_secret_access_key(&self) -> Option<&str> {
        self.storage.secret_access_key.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.storage.region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.storage.endpoint.as_deref()
    }

    pub fn url_expiry_secs(&self) -> u64 {
        self.storage.url_expiry_secs
    }

    pub fn video_extensions(&self) -> &[String] {
        &self.storage.video_extensions
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.storage.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.storage.local_storage_base_url.as_deref()
    }
}
