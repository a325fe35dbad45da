//! Upload pipeline: extract → validate type → validate size → describe → store.

mod service;
mod types;

pub use service::UploadService;
