//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using session storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to read or write the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}
