//! Master metadata and storage entries

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::keys::chunk_key;

/// Upper bound on `chunkCount` accepted from a master entry
///
/// A larger count cannot come from a real write (the encoder refuses to
/// produce one) and is reported as corrupt metadata.
pub const MAX_CHUNK_COUNT: usize = 1 << 20;

/// How the chunked payload is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageType {
    /// Payload compressed before chunking
    #[default]
    Compressed,

    /// Payload chunked as-is
    Uncompressed,
}

/// Record stored under the master key of an item
///
/// Wire format: `{"storageType":"COMPRESSED","chunkCount":3}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MasterMetadata {
    pub storage_type: StorageType,

    /// Exact number of chunk keys written for this generation
    pub chunk_count: usize,
}

impl MasterMetadata {
    pub fn new(storage_type: StorageType, chunk_count: usize) -> Self {
        Self {
            storage_type,
            chunk_count,
        }
    }

    /// Serialize to the text stored under the master key
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the text found under the master key of `key`
    ///
    /// Fails with `CorruptMetadata` on malformed text or a chunk count above
    /// [`MAX_CHUNK_COUNT`].
    pub fn parse(key: &str, text: &str) -> Result<Self> {
        let metadata: Self = serde_json::from_str(text).map_err(|e| StoreError::CorruptMetadata {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        if metadata.chunk_count > MAX_CHUNK_COUNT {
            return Err(StoreError::CorruptMetadata {
                key: key.to_string(),
                reason: format!(
                    "chunkCount {} exceeds limit {}",
                    metadata.chunk_count, MAX_CHUNK_COUNT
                ),
            });
        }
        Ok(metadata)
    }

    /// Chunk keys named by this record, ascending
    pub fn chunk_keys<'a>(&self, key: &'a str) -> impl Iterator<Item = String> + 'a {
        (0..self.chunk_count).map(move |index| chunk_key(key, index))
    }
}

/// One key/value pair destined for the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub key: String,
    pub value: String,
}

impl StorageEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
