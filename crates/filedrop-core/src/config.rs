//! Configuration module
//!
//! Configuration is read once at process start from the environment (after loading
//! `.env`) and is immutable afterwards. Storage credentials are not validated here;
//! a missing key only surfaces when the first upload reaches storage.

use std::env;

use crate::constants::DEFAULT_MAX_FILE_SIZE_BYTES;
use crate::storage_types::StorageBackend;
use crate::validation::{AllowList, UploadConstraints};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub cors_origin: String,
    pub environment: String,
    /// `compact` (default) or `json`
    pub log_format: String,
}

/// Upload service configuration
#[derive(Clone, Debug)]
pub struct UploaderConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_region: Option<String>,
    pub bucket_name: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Upload constraints
    pub max_file_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploaderConfig>);

impl Config {
    fn as_uploader(&self) -> &UploaderConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = UploaderConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_uploader().validate()
    }

    pub fn server_host(&self) -> &str {
        &self.as_uploader().base.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.as_uploader().base.server_port
    }

    pub fn cors_origin(&self) -> &str {
        &self.as_uploader().base.cors_origin
    }

    pub fn environment(&self) -> &str {
        &self.as_uploader().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_uploader().base.log_format
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_uploader().storage_backend
    }

    pub fn aws_access_key_id(&self) -> Option<&str> {
        self.as_uploader().aws_access_key_id.as_deref()
    }

    pub fn aws_secret_access_key(&self) -> Option<&str> {
        self.as_uploader().aws_secret_access_key.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_uploader().aws_region.as_deref()
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.as_uploader().bucket_name.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_uploader().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_uploader().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_uploader().local_storage_base_url.as_deref()
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_uploader().max_file_size_bytes
    }

    /// Upload rules derived from this configuration with the built-in allow-list.
    pub fn upload_constraints(&self) -> UploadConstraints {
        UploadConstraints::new(self.max_file_size_bytes(), AllowList::default())
    }
}

impl UploaderConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => DEFAULT_PORT,
            },
            cors_origin: var("CORS_ORIGIN")
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            environment,
            log_format: var("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => StorageBackend::S3,
        };

        let max_file_size_bytes = match var("MAX_FILE_SIZE_BYTES") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE_BYTES must be a valid number"))?,
            None => DEFAULT_MAX_FILE_SIZE_BYTES,
        };

        let config = UploaderConfig {
            base,
            storage_backend,
            aws_access_key_id: var("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
            aws_region: var("AWS_REGION"),
            bucket_name: var("BUCKET_NAME"),
            s3_endpoint: var("S3_ENDPOINT"),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
            max_file_size_bytes,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.cors_origin == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGIN must be a single explicit origin because credentials are allowed"
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_BYTES must be greater than zero"));
        }

        if self.storage_backend == StorageBackend::Local {
            if self.local_storage_path.is_none() {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_PATH must be set when using local storage backend"
                ));
            }
            if self.local_storage_base_url.is_none() {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                ));
            }
        }

        Ok(())
    }
}
