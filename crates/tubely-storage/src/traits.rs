//! Storage abstraction traits

use crate::keys::ObjectKey;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use thiserror::Error;
use tubely_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Object store holding published videos.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stream the file at `path` to `key` with the given content type and return the
    /// public URL of the stored object.
    ///
    /// Writing to an existing key replaces the object.
    async fn put_file(
        &self,
        key: &ObjectKey,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Public URL for `key`. Does not check that the object exists.
    fn public_url(&self, key: &ObjectKey) -> String;
}

/// Directory of locally served assets (thumbnails).
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Write `data` as `file_name` and return its public URL.
    async fn save(&self, file_name: &str, data: Bytes) -> StorageResult<String>;

    /// Remove `file_name`. Removing a missing file is not an error.
    async fn delete(&self, file_name: &str) -> StorageResult<()>;

    fn public_url(&self, file_name: &str) -> String;
}
