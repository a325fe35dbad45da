//! Common utilities for the upload handler

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use filedrop_core::constants::FILE_FIELD_NAME;
use filedrop_core::validation::{extension_of, format_mb_one_decimal, AllowList};
use filedrop_core::AppError;

/// File part pulled out of a multipart request, held in memory for one request.
#[derive(Debug)]
pub struct IncomingFile {
    pub data: Vec<u8>,
    /// Client-supplied name; empty when the part carried none
    pub filename: String,
    /// Declared content type, untrusted
    pub content_type: Option<String>,
}

fn file_too_large(max_size: usize) -> AppError {
    AppError::FileTooLarge(format!(
        "File too large. Maximum size is {}MB",
        format_mb_one_decimal(max_size)
    ))
}

/// A body cut off by the transport limit reads as an oversized file, not a malformed one.
fn multipart_read_error(error: MultipartError, context: &str, max_size: usize) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return file_too_large(max_size);
    }
    AppError::InvalidInput(format!("{}: {}", context, error))
}

/// Extract file data, filename, and content type from multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<IncomingFile, AppError> {
    let mut incoming: Option<IncomingFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_read_error(e, "Failed to read multipart", max_size))?
    {
        if field.name() != Some(FILE_FIELD_NAME) {
            continue;
        }

        if incoming.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|s: &str| s.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_read_error(e, "Failed to read file data", max_size))?;

        incoming = Some(IncomingFile {
            data: data.to_vec(),
            filename,
            content_type,
        });
    }

    incoming.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
}

/// Validate the filename against the allow-list, returning its lowercased extension.
pub fn validate_file_type(filename: &str, allow_list: &AllowList) -> Result<String, AppError> {
    if !allow_list.is_allowed(filename) {
        return Err(AppError::InvalidFileType(allow_list.rejection_message()));
    }

    extension_of(filename).ok_or_else(|| AppError::InvalidFileType(allow_list.rejection_message()))
}

/// Validate file size; exactly `max_size` bytes is accepted.
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(file_too_large(max_size));
    }
    Ok(())
}
