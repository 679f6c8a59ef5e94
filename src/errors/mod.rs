//! Error types for the storefront

use std::{io, path::PathBuf};

use thiserror::Error;

/// Storefront errors (catalog lookups, configuration).
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    /// Product already exists.
    #[error("Product already exists: {0}")]
    ProductAlreadyExists(String),
    /// Unknown sort option.
    #[error("Unknown sort option: {0}")]
    UnknownSortOrder(String),
    /// Configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        /// Config path.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Configuration file could not be parsed.
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        /// Config path.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Persistence layer failure.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Errors raised by a [`KeyValueStore`](crate::implementation::persistence::KeyValueStore).
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Lock acquisition failed.
    #[error("Failed to acquire storage lock")]
    LockError,
    /// Key is not usable by this store.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
    /// Underlying I/O failure.
    #[error("Storage I/O error for key {key}: {source}")]
    Io {
        /// Storage key.
        key:    String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Store refused the write (quota or read-only).
    #[error("Storage quota exceeded for key {0}")]
    QuotaExceeded(String),
}

/// Result type for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
