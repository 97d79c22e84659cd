//! Storage abstraction trait
//!
//! This module defines the Storage trait that all media store backends implement.

use crate::StorageBackend;
use async_trait::async_trait;
use folio_core::AppError;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("Image '{}' not found", key)),
            StorageError::InvalidKey(msg) => AppError::ValidationFailed(msg),
            other => AppError::StorageFailed(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked byte stream returned by [`Storage::read_stream`]
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Media store abstraction
///
/// The ingestion pipeline and the image retrieval handler work against this
/// trait only, so the backend is chosen once at startup.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Durably write `data` under `key`, replacing any existing object.
    async fn write(&self, key: &str, data: &[u8]) -> StorageResult<()>;

    /// Read a whole object.
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Read an object as a stream of chunks (for serving files).
    async fn read_stream(&self, key: &str) -> StorageResult<ByteStream>;

    /// Delete an object. Deleting a missing object succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
