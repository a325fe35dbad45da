use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use filedrop_core::models::ObjectMetadata;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Suffix of the JSON sidecar that holds an object's metadata bag.
const METADATA_SUFFIX: &str = ".metadata.json";

/// Local filesystem storage implementation
///
/// Objects are written under `base_path/<key>`; the metadata bag goes to
/// `base_path/<key>.metadata.json` since plain files carry no user metadata.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/filedrop")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path, rejecting keys that could leave the
    /// base directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains("..")
            || storage_key.starts_with('/')
            || storage_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    fn metadata_path(path: &Path) -> PathBuf {
        let mut os_string = path.as_os_str().to_owned();
        os_string.push(METADATA_SUFFIX);
        PathBuf::from(os_string)
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn write_file(path: &Path, data: &[u8]) -> StorageResult<()> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_with_metadata(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let mut sidecar = serde_json::to_value(metadata)
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        sidecar["stored_content_type"] = serde_json::Value::from(content_type);
        let sidecar = serde_json::to_vec_pretty(&sidecar)
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        Self::write_file(&path, &data).await?;
        Self::write_file(&Self::metadata_path(&path), &sidecar).await?;

        let url = self.generate_url(storage_key);

        tracing::info!(
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local upload successful"
        );

        Ok(url)
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.generate_url(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_metadata() -> ObjectMetadata {
        ObjectMetadata {
            original_filename: "notes.txt".to_string(),
            file_size: "5".to_string(),
            content_type: "text/plain".to_string(),
            category: "document".to_string(),
            upload_time: "2024-05-01T10:00:00.000000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_local_storage_upload_writes_object_and_sidecar() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8000/files/".to_string())
            .await
            .unwrap();

        let url = storage
            .upload_with_metadata("abc.txt", b"hello".to_vec(), "text/plain", &sample_metadata())
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8000/files/abc.txt");
        assert_eq!(std::fs::read(dir.path().join("abc.txt")).unwrap(), b"hello");

        let sidecar: serde_json::Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("abc.txt.metadata.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(sidecar["original_filename"], "notes.txt");
        assert_eq!(sidecar["file_size"], "5");
        assert_eq!(sidecar["stored_content_type"], "text/plain");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8000/files".to_string())
            .await
            .unwrap();

        let result = storage
            .upload_with_metadata("../escape.txt", vec![1], "text/plain", &sample_metadata())
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage
            .upload_with_metadata("/etc/passwd", vec![1], "text/plain", &sample_metadata())
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_backend_type_is_local() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8000/files".to_string())
            .await
            .unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
