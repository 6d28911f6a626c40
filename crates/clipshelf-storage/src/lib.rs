//! Clipshelf Storage Library
//!
//! This crate provides the storage abstraction used by the API and its
//! implementations for S3-compatible services and the local filesystem.
//!
//! # Keys
//!
//! Keys are `/`-separated object paths exactly as the provider reports them.
//! Listing returns every key under a prefix; filtering to videos happens in
//! `clipshelf-core`.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use clipshelf_core::{StorageBackend, StoredObject};
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::{S3Access, S3Storage};
pub use traits::{Storage, StorageError, StorageResult};
