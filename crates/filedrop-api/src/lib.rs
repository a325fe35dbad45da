//! Filedrop API Library
//!
//! This crate provides the HTTP handlers, upload service, and application setup.

mod handlers;
mod services;
mod utils;

// Public modules
pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
