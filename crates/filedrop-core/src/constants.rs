//! Upload-wide constants

/// Bytes in one megabyte as used for every size shown to clients (1024 * 1024).
pub const BYTES_PER_MB: usize = 1024 * 1024;

/// Default upload ceiling: 5 MB.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 5 * BYTES_PER_MB;

/// Content type recorded when the client did not declare one.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Category returned for extensions that are in no allow-list.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Multipart field that carries the uploaded file.
pub const FILE_FIELD_NAME: &str = "file";

/// Default allow-list, in classification order.
pub const DEFAULT_ALLOWED_FILE_TYPES: &[(&str, &[&str])] = &[
    ("image", &["jpg", "jpeg", "png", "gif", "bmp", "webp"]),
    ("document", &["pdf", "doc", "docx", "txt", "rtf"]),
    ("archive", &["zip", "rar", "7z", "tar", "gz"]),
    ("video", &["mp4", "avi", "mov", "wmv", "flv", "webm"]),
    ("audio", &["mp3", "wav", "flac", "aac", "ogg"]),
];
