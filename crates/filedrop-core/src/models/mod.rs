//! Domain models module
//!
//! Types that cross the storage/API boundary or are serialized to clients.

pub mod upload;

pub use upload::{ObjectMetadata, UploadMetadata, UploadResponse};
