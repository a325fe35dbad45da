//! Upload validation rules
//!
//! The allow-list decides which filenames may be uploaded and which category each
//! extension belongs to; [`UploadConstraints`] pairs it with the size ceiling.

mod allow_list;
mod size;

pub use allow_list::{extension_of, AllowList, CategoryRule};
pub use size::{bytes_to_mb, format_mb_one_decimal};

use crate::constants::DEFAULT_MAX_FILE_SIZE_BYTES;

/// Static upload rules, built once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct UploadConstraints {
    pub max_file_size_bytes: usize,
    pub allow_list: AllowList,
}

impl UploadConstraints {
    pub fn new(max_file_size_bytes: usize, allow_list: AllowList) -> Self {
        Self {
            max_file_size_bytes,
            allow_list,
        }
    }
}

impl Default for UploadConstraints {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE_BYTES, AllowList::default())
    }
}
