//! Folio Storage Library
//!
//! The media store: durable byte storage for processed photos, addressed by the
//! filename the ingestion pipeline generates.
//!
//! # Storage key format
//!
//! Keys are flat, opaque filenames such as `3f2a...c1.jpg`. Keys must not contain
//! `..`, a leading `/` or a backslash; every backend rejects them with
//! [`StorageError::InvalidKey`].

pub mod factory;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use folio_core::StorageBackend;
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
