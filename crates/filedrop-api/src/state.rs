//! Application state shared by every request.
//!
//! Built once in `setup` and handed to the router behind an `Arc`; nothing in it is
//! mutated after startup.

use filedrop_core::{Config, UploadConstraints};
use filedrop_storage::Storage;
use std::sync::Arc;

/// Storage backend plus the rules every upload is checked against.
#[derive(Clone)]
pub struct UploadState {
    pub storage: Arc<dyn Storage>,
    pub constraints: Arc<UploadConstraints>,
}

#[derive(Clone)]
pub struct AppState {
    pub upload: UploadState,
}

impl AppState {
    pub fn new(config: &Config, storage: Arc<dyn Storage>) -> Self {
        let constraints = Arc::new(config.upload_constraints());
        Self {
            upload: UploadState {
                storage,
                constraints,
            },
        }
    }
}
