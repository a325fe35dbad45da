use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use filedrop_core::models::ObjectMetadata;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, CredentialProvider, ObjectStore, PutOptions,
    PutPayload, Result as ObjectResult,
};

/// Connection settings for [`S3Storage`]
#[derive(Clone, Debug, Default)]
pub struct S3Settings {
    pub bucket: String,
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Custom endpoint for S3-compatible providers (e.g. "http://localhost:9000" for MinIO)
    pub endpoint_url: Option<String>,
}

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    endpoint_url: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// Missing credentials are not an error here; they are reported by the first
    /// upload as [`StorageError::MissingCredentials`].
    pub fn new(settings: S3Settings) -> StorageResult<Self> {
        Self::with_builder(AmazonS3Builder::from_env(), settings)
    }

    /// Create an S3Storage on top of a preconfigured builder; `settings` take precedence.
    pub fn with_builder(builder: AmazonS3Builder, settings: S3Settings) -> StorageResult<Self> {
        let S3Settings {
            bucket,
            region,
            access_key_id,
            secret_access_key,
            endpoint_url,
        } = settings;

        let mut builder = builder.with_bucket_name(bucket.clone());

        if let Some(ref region) = region {
            builder = builder.with_region(region.clone());
        }

        if let (Some(access_key_id), Some(secret_access_key)) = (access_key_id, secret_access_key)
        {
            builder = builder
                .with_access_key_id(access_key_id)
                .with_secret_access_key(secret_access_key);
        }

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            endpoint_url,
        })
    }

    /// Generate public URL for S3 object
    ///
    /// AWS uses the virtual-hosted form `https://{bucket}.s3.amazonaws.com/{key}`;
    /// S3-compatible providers use path style under their endpoint.
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
        }
    }

    fn attributes(content_type: &str, metadata: &ObjectMetadata) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        for (name, value) in metadata.pairs() {
            attributes.insert(
                Attribute::Metadata(name.into()),
                AttributeValue::from(value.to_string()),
            );
        }
        attributes
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_with_metadata(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<String> {
        // Resolve through the same provider chain the request will be signed with
        // (explicit keys, web identity, container, instance metadata).
        if let Err(e) = self.store.credentials().get_credential().await {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                "S3 upload aborted: no credentials available"
            );
            return Err(StorageError::MissingCredentials);
        }

        let size = data.len() as u64;
        let location = Path::from(storage_key.to_string());
        let options = PutOptions {
            attributes: Self::attributes(content_type, metadata),
            ..Default::default()
        };

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.generate_url(storage_key);

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.generate_url(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::RetryConfig;
    use std::time::Duration;

    fn settings(bucket: &str) -> S3Settings {
        S3Settings {
            bucket: bucket.to_string(),
            region: Some("us-east-1".to_string()),
            ..Default::default()
        }
    }

    fn sample_metadata() -> ObjectMetadata {
        ObjectMetadata {
            original_filename: "report.pdf".to_string(),
            file_size: "1024".to_string(),
            content_type: "application/pdf".to_string(),
            category: "document".to_string(),
            upload_time: "2024-05-01T10:00:00.000000".to_string(),
        }
    }

    #[test]
    fn aws_url_is_virtual_hosted() {
        let storage = S3Storage::new(settings("uploads")).unwrap();
        assert_eq!(
            storage.public_url("abc.pdf"),
            "https://uploads.s3.amazonaws.com/abc.pdf"
        );
    }

    #[test]
    fn custom_endpoint_url_is_path_style() {
        let storage = S3Storage::new(S3Settings {
            endpoint_url: Some("http://localhost:9000/".to_string()),
            ..settings("uploads")
        })
        .unwrap();
        assert_eq!(
            storage.public_url("abc.pdf"),
            "http://localhost:9000/uploads/abc.pdf"
        );
    }

    fn attribute<'a>(attributes: &'a Attributes, key: &Attribute) -> Option<&'a str> {
        attributes.get(key).map(|value| value.as_ref())
    }

    #[test]
    fn metadata_becomes_user_attributes() {
        let attributes = S3Storage::attributes("application/pdf", &sample_metadata());
        assert_eq!(
            attribute(&attributes, &Attribute::ContentType),
            Some("application/pdf")
        );
        assert_eq!(
            attribute(&attributes, &Attribute::Metadata("category".into())),
            Some("document")
        );
        assert_eq!(
            attribute(&attributes, &Attribute::Metadata("file_size".into())),
            Some("1024")
        );
    }

    /// Builder whose only credential source is an instance metadata endpoint that
    /// refuses connections.
    fn builder_without_credentials() -> AmazonS3Builder {
        AmazonS3Builder::new()
            .with_metadata_endpoint("http://127.0.0.1:1")
            .with_retry(RetryConfig {
                max_retries: 0,
                retry_timeout: Duration::from_secs(1),
                ..Default::default()
            })
    }

    #[tokio::test]
    async fn explicit_keys_resolve_without_network() {
        let storage = S3Storage::with_builder(
            builder_without_credentials(),
            S3Settings {
                access_key_id: Some("AKIDEXAMPLE".to_string()),
                secret_access_key: Some("secret".to_string()),
                ..settings("uploads")
            },
        )
        .unwrap();

        let credential = storage.store.credentials().get_credential().await.unwrap();
        assert_eq!(credential.key_id, "AKIDEXAMPLE");
    }

    #[tokio::test]
    async fn unresolvable_credentials_map_to_missing_credentials() {
        let storage =
            S3Storage::with_builder(builder_without_credentials(), settings("uploads")).unwrap();
        let result = storage
            .upload_with_metadata(
                "abc.pdf",
                b"%PDF".to_vec(),
                "application/pdf",
                &sample_metadata(),
            )
            .await;
        assert!(matches!(result, Err(StorageError::MissingCredentials)));
    }
}
