//! Upload service
//!
//! Runs the whole request in order: extract → validate type → validate size →
//! build metadata → one storage write. Nothing touches storage until both checks pass.

use axum::extract::Multipart;
use chrono::Local;
use filedrop_core::constants::FALLBACK_CONTENT_TYPE;
use filedrop_core::models::{ObjectMetadata, UploadMetadata, UploadResponse};
use filedrop_core::validation::bytes_to_mb;
use filedrop_core::AppError;
use filedrop_storage::generate_storage_key;

use crate::error::storage_error_to_app_error;
use crate::state::UploadState;
use crate::utils::upload::{extract_multipart_file, validate_file_size, validate_file_type};

use super::types::ValidatedFile;

/// Naive local ISO-8601 with microseconds, e.g. `2024-05-01T10:00:00.123456`.
const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub struct UploadService {
    state: UploadState,
}

impl UploadService {
    pub fn new(state: &UploadState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Complete upload workflow for one multipart request.
    pub async fn upload(&self, multipart: Multipart) -> Result<UploadResponse, AppError> {
        let validated = self.extract_and_validate(multipart).await?;
        self.store(validated).await
    }

    /// Extract and validate file from multipart request
    async fn extract_and_validate(&self, multipart: Multipart) -> Result<ValidatedFile, AppError> {
        let constraints = &self.state.constraints;
        let incoming = extract_multipart_file(multipart, constraints.max_file_size_bytes).await?;

        let extension = validate_file_type(&incoming.filename, &constraints.allow_list)?;
        validate_file_size(incoming.data.len(), constraints.max_file_size_bytes)?;

        Ok(ValidatedFile {
            data: incoming.data,
            original_filename: incoming.filename,
            content_type: incoming
                .content_type
                .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
            extension,
        })
    }

    fn describe(&self, file: &ValidatedFile, storage_key: String) -> UploadMetadata {
        let file_size = file.data.len();
        UploadMetadata {
            original_filename: file.original_filename.clone(),
            file_size,
            file_size_mb: bytes_to_mb(file_size),
            content_type: file.content_type.clone(),
            category: self
                .state
                .constraints
                .allow_list
                .classify(&file.extension)
                .to_string(),
            upload_time: Local::now()
                .naive_local()
                .format(UPLOAD_TIME_FORMAT)
                .to_string(),
            unique_filename: storage_key,
        }
    }

    /// Write the file under a fresh key and build the client response
    async fn store(&self, file: ValidatedFile) -> Result<UploadResponse, AppError> {
        let storage_key = generate_storage_key(&file.extension);
        let metadata = self.describe(&file, storage_key);

        tracing::info!(
            original_filename = %metadata.original_filename,
            file_size = metadata.file_size,
            file_size_mb = metadata.file_size_mb,
            content_type = %metadata.content_type,
            category = %metadata.category,
            storage_key = %metadata.unique_filename,
            upload_time = %metadata.upload_time,
            "Uploading file"
        );

        let object_metadata = ObjectMetadata::from(&metadata);
        let url = self
            .state
            .storage
            .upload_with_metadata(
                &metadata.unique_filename,
                file.data,
                &file.content_type,
                &object_metadata,
            )
            .await
            .map_err(storage_error_to_app_error)?;

        Ok(UploadResponse { url, metadata })
    }
}
