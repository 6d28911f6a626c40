//! Clipshelf Core Library
//!
//! This crate provides configuration, error types, and the domain models shared
//! by the storage backends and the HTTP API.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{normalize_prefix, BaseConfig, Config, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{PresignedUrlResponse, StoredObject, VideoDescriptor, VideoListResponse};
pub use storage_types::StorageBackend;
