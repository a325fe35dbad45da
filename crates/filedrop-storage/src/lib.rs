//! Filedrop Storage Library
//!
//! This crate provides the storage abstraction and its S3 and local filesystem
//! implementations.
//!
//! # Storage key format
//!
//! Every upload is stored under a flat key `<uuid>.<extension>`, where the uuid is a
//! fresh random v4 identifier and the extension is the lowercased last dot-segment of
//! the original filename. Key generation lives in the `keys` module so all callers
//! agree on the layout.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use filedrop_core::StorageBackend;
pub use keys::generate_storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::{S3Settings, S3Storage};
pub use traits::{Storage, StorageError, StorageResult};
