//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{Builder, ErrorKind, Operator, services};
use tracing::debug;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Durable, publicly readable blob persistence.
///
/// Implemented by [`StorageService`]; tests substitute their own writer to
/// inject faults.
pub trait BlobWriter: Send + Sync {
    /// Persist `bytes` at `path` and return the object's public URL.
    ///
    /// A returned URL resolves to exactly the bytes of this write.
    fn write(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> impl std::future::Future<Output = Result<String, StorageError>> + Send;
}

/// Storage service for resource assets.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => finish(
                services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region),
            ),
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => finish(
                services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container),
            ),
            StorageProvider::LocalFs { root } => finish(
                services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                ),
            ),
            StorageProvider::Memory => finish(services::Memory::default()),
        }
    }

    /// Check a payload against config constraints before writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is empty or too large.
    pub fn validate_payload(&self, key: &str, size: u64) -> Result<(), StorageError> {
        if size == 0 {
            return Err(StorageError::EmptyPayload {
                key: key.to_string(),
            });
        }
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }
        Ok(())
    }

    /// Write bytes under `key`, overwriting any previous object.
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StorageError> {
        self.operator
            .write_with(key, bytes)
            .content_type(content_type)
            .await
            .map_err(|e| StorageError::write_failed(key, e.to_string()))?;
        Ok(())
    }

    /// Confirm the object at `key` is readable with the expected length and
    /// return its public URL.
    async fn publish(&self, key: &str, expected_len: u64) -> Result<String, StorageError> {
        let meta = self
            .operator
            .stat(key)
            .await
            .map_err(|e| StorageError::publish_failed(key, e.to_string()))?;

        if meta.content_length() != expected_len {
            return Err(StorageError::publish_failed(
                key,
                format!(
                    "stored length {} does not match written length {expected_len}",
                    meta.content_length()
                ),
            ));
        }

        Ok(self.config.public_url(key))
    }

    /// Read an object back.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or cannot be read.
    pub async fn read(&self, key: &str) -> Result<Bytes, StorageError> {
        let buffer = self.operator.read(key).await.map_err(StorageError::from)?;
        Ok(buffer.to_bytes())
    }

    /// Check if a file exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket/container name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

impl BlobWriter for StorageService {
    async fn write(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let len = bytes.len() as u64;
        self.validate_payload(path, len)?;
        self.put(path, bytes, content_type).await?;
        let url = self.publish(path, len).await?;
        debug!(path, size = len, content_type, "Object stored");
        Ok(url)
    }
}

fn finish<B: Builder>(builder: B) -> Result<Operator, StorageError> {
    Ok(Operator::new(builder)
        .map_err(|e| StorageError::configuration(e.to_string()))?
        .finish())
}
