use serde::{Deserialize, Serialize};

/// Metadata describing one accepted upload, returned to the client under `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub original_filename: String,
    /// Size in bytes
    pub file_size: usize,
    /// Size in megabytes, rounded to two decimals
    pub file_size_mb: f64,
    pub content_type: String,
    pub category: String,
    /// Local time, ISO-8601 without offset
    pub upload_time: String,
    /// Storage key the file was written under (`<uuid>.<ext>`)
    pub unique_filename: String,
}

/// Success body of `POST /upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub metadata: UploadMetadata,
}

/// Metadata bag attached to the stored object.
///
/// Every value is a string because object stores only carry string metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub original_filename: String,
    pub file_size: String,
    pub content_type: String,
    pub category: String,
    pub upload_time: String,
}

impl ObjectMetadata {
    /// Key/value pairs in a stable order, as sent to the backend.
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("original_filename", self.original_filename.as_str()),
            ("file_size", self.file_size.as_str()),
            ("content_type", self.content_type.as_str()),
            ("category", self.category.as_str()),
            ("upload_time", self.upload_time.as_str()),
        ]
    }
}

impl From<&UploadMetadata> for ObjectMetadata {
    fn from(metadata: &UploadMetadata) -> Self {
        Self {
            original_filename: metadata.original_filename.clone(),
            file_size: metadata.file_size.to_string(),
            content_type: metadata.content_type.clone(),
            category: metadata.category.clone(),
            upload_time: metadata.upload_time.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UploadMetadata {
        UploadMetadata {
            original_filename: "photo.png".to_string(),
            file_size: 2_097_152,
            file_size_mb: 2.0,
            content_type: "image/png".to_string(),
            category: "image".to_string(),
            upload_time: "2024-05-01T10:00:00.000000".to_string(),
            unique_filename: "0b1c6f0e-8a51-4a35-9a51-1f8f4b0e2c11.png".to_string(),
        }
    }

    #[test]
    fn response_serializes_with_expected_fields() {
        let response = UploadResponse {
            url: "https://bucket.s3.amazonaws.com/key.png".to_string(),
            metadata: sample(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["url"], "https://bucket.s3.amazonaws.com/key.png");
        assert_eq!(json["metadata"]["file_size"], 2_097_152);
        assert_eq!(json["metadata"]["file_size_mb"], 2.0);
        assert_eq!(json["metadata"]["category"], "image");
        assert!(json["metadata"]["unique_filename"].is_string());
    }

    #[test]
    fn object_metadata_stringifies_size() {
        let metadata = ObjectMetadata::from(&sample());
        assert_eq!(metadata.file_size, "2097152");
        let pairs = metadata.pairs();
        assert_eq!(pairs[0], ("original_filename", "photo.png"));
        assert_eq!(pairs[1], ("file_size", "2097152"));
    }
}
