//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; every failure renders as
//! `{ "detail": "..." }` with the status code taken from [`ErrorMetadata`].

use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filedrop_core::{AppError, ErrorMetadata, LogLevel};
use filedrop_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// `AppError` rendered as an HTTP response.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

/// Multipart bodies axum could not even start parsing (wrong content type, bad boundary).
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid multipart request: {}",
            rejection.body_text()
        )))
    }
}

/// Missing credentials keep their fixed client message; every other storage failure
/// surfaces with its own text.
pub fn storage_error_to_app_error(err: StorageError) -> AppError {
    match err {
        StorageError::MissingCredentials => AppError::StorageCredentials,
        StorageError::UploadFailed(msg) => AppError::Storage(msg),
        StorageError::InvalidKey(msg) => AppError::Storage(msg),
        StorageError::ConfigError(msg) => AppError::Storage(msg),
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, error_code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, error_code, "Upload rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, error_code, "Upload failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            detail: app_error.client_message(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_missing_credentials() {
        let app_err = storage_error_to_app_error(StorageError::MissingCredentials);
        assert!(matches!(app_err, AppError::StorageCredentials));
        assert_eq!(app_err.client_message(), "AWS credentials not found");
    }

    #[test]
    fn test_storage_error_upload_failed_keeps_text() {
        let storage_err = StorageError::UploadFailed("bucket does not exist".to_string());
        let app_err = storage_error_to_app_error(storage_err);
        match app_err {
            AppError::Storage(msg) => assert_eq!(msg, "bucket does not exist"),
            other => panic!("Expected Storage variant, got {:?}", other),
        }
    }

    #[test]
    fn test_storage_error_invalid_key_is_server_error() {
        let app_err =
            storage_error_to_app_error(StorageError::InvalidKey("../escape".to_string()));
        assert_eq!(app_err.http_status_code(), 500);
        assert_eq!(app_err.client_message(), "../escape");
    }

    #[tokio::test]
    async fn test_into_response_renders_detail() {
        let response =
            HttpAppError(AppError::FileTooLarge("File too large. Maximum size is 5.0MB".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "File too large. Maximum size is 5.0MB");
    }
}
