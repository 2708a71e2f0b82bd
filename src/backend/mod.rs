//! Backend Module
//!
//! The primitive key-value store underneath the chunk layer.
//!
//! ## Contract
//! - `get` returns `None` for an absent key
//! - each call is atomic for its own key; there are no cross-key transactions
//! - any call may fail independently (I/O, per-entry quota, refusal)
//!
//! Implementations:
//! - `MemoryBackend`: in-process map with size limits and failure injection
//! - `FileBackend`: one file per key under a directory

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::BackendError;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Result type for backend calls
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Primitive key-value store with small text values
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the value for `key`
    async fn get(&self, key: &str) -> BackendResult<Option<String>>;

    /// Create or overwrite `key`
    async fn set(&self, key: &str, value: &str) -> BackendResult<()>;

    /// Remove `key`; removing an absent key succeeds
    async fn delete(&self, key: &str) -> BackendResult<()>;
}
