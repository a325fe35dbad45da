//! Error types module
//!
//! All request failures are unified under [`AppError`]. Variants are split by who
//! caused the failure (client validation, storage credentials, other storage failures) so the
//! HTTP layer can map each kind to a status code explicitly.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for malformed requests
    Debug,
    /// Warning level - for rejected uploads
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message, rendered as the response `detail`
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File type rejected: {0}")]
    InvalidFileType(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage credentials not found")]
    StorageCredentials,

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::InvalidFileType(_) => (400, "INVALID_FILE_TYPE", LogLevel::Warn),
        AppError::FileTooLarge(_) => (400, "FILE_TOO_LARGE", LogLevel::Warn),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::StorageCredentials => (500, "STORAGE_CREDENTIALS_MISSING", LogLevel::Error),
        AppError::Storage(_) => (500, "STORAGE_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidFileType(_) => "InvalidFileType",
            AppError::FileTooLarge(_) => "FileTooLarge",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::StorageCredentials => "StorageCredentials",
            AppError::Storage(_) => "Storage",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    // Storage failures pass their raw text through to the client.
    fn client_message(&self) -> String {
        match self {
            AppError::InvalidFileType(ref msg) => msg.clone(),
            AppError::FileTooLarge(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::StorageCredentials => "AWS credentials not found".to_string(),
            AppError::Storage(ref msg) => msg.clone(),
        }
    }
}
