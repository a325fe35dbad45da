//! Storage key generation.
//!
//! Key format: `<uuid>.<extension>`. No collision check is made; two uploads of the
//! same file always get two different keys.

use uuid::Uuid;

/// Generate a fresh storage key for a file with the given (already lowercased) extension.
pub fn generate_storage_key(extension: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), extension)
}
