//! In-memory storage backend that records every write.

#![allow(dead_code)]

use async_trait::async_trait;
use filedrop_core::models::ObjectMetadata;
use filedrop_storage::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::{Arc, Mutex};

/// One recorded `upload_with_metadata` call.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub size: usize,
    pub content_type: String,
    pub metadata: ObjectMetadata,
}

/// How the next uploads should fail, if at all.
#[derive(Debug, Clone)]
pub enum FailureMode {
    None,
    MissingCredentials,
    UploadFailed(String),
}

#[derive(Clone)]
pub struct MockStorage {
    objects: Arc<Mutex<Vec<StoredObject>>>,
    failure: Arc<Mutex<FailureMode>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(FailureMode::None)),
        }
    }

    pub fn fail_with(&self, mode: FailureMode) {
        *self.failure.lock().unwrap() = mode;
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload_with_metadata(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<String> {
        match self.failure.lock().unwrap().clone() {
            FailureMode::None => {}
            FailureMode::MissingCredentials => return Err(StorageError::MissingCredentials),
            FailureMode::UploadFailed(msg) => return Err(StorageError::UploadFailed(msg)),
        }

        self.objects.lock().unwrap().push(StoredObject {
            key: storage_key.to_string(),
            size: data.len(),
            content_type: content_type.to_string(),
            metadata: metadata.clone(),
        });

        Ok(self.public_url(storage_key))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("https://test-bucket.s3.amazonaws.com/{}", storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
