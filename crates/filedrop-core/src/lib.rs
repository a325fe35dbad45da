//! Filedrop Core Library
//!
//! This crate provides the domain models, error types, configuration, and upload
//! validation rules shared by the storage and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploaderConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
pub use validation::{AllowList, CategoryRule, UploadConstraints};
