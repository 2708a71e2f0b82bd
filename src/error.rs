//! Error types for chunkstore
//!
//! Provides a unified error type for all operations.
//!
//! Soft failures (missing chunks, undecodable compressed payloads) are not
//! errors; they surface as [`crate::store::MissReason`] values instead.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for chunkstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Caller Contract Errors
    // -------------------------------------------------------------------------
    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("chunkstore already configured")]
    AlreadyConfigured,

    #[error("Invalid chunk size: {0} (must be at least 1 byte)")]
    InvalidChunkSize(usize),

    // -------------------------------------------------------------------------
    // Backend Errors
    // -------------------------------------------------------------------------
    #[error("Backend error on {key}: {source}")]
    Backend {
        key: String,
        #[source]
        source: BackendError,
    },

    // -------------------------------------------------------------------------
    // Integrity Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt master metadata for {key}: {reason}")]
    CorruptMetadata { key: String, reason: String },

    #[error("Corrupt payload for {key}: {source}")]
    CorruptValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Value for {key} needs {chunk_count} chunks, limit is {limit}")]
    ValueTooLarge {
        key: String,
        chunk_count: usize,
        limit: usize,
    },

    #[error("Compression error: {0}")]
    Compression(String),
}

impl StoreError {
    /// Wrap a backend failure with the key it happened on
    pub fn backend(key: impl Into<String>, source: BackendError) -> Self {
        StoreError::Backend {
            key: key.into(),
            source,
        }
    }
}

/// Failure reported by an underlying key-value primitive
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The entry is larger than the primitive accepts for a single key
    #[error("Value for {key} is {size} bytes, limit is {limit}")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    /// The key cannot be mapped onto the backend's own namespace
    #[error("Unsafe backend key: {0:?}")]
    UnsafeKey(String),

    #[error("Rejected: {0}")]
    Rejected(String),
}
