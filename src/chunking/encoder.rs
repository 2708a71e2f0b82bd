//! Storage Encoder
//!
//! Builds the complete write-set for one generation of an item. Pure: it
//! touches no backend and no shared state.

use std::num::NonZeroUsize;

use crate::compression::Compressor;
use crate::error::{Result, StoreError};
use crate::keys::{chunk_key, master_key};

use super::{split, MasterMetadata, StorageEntry, StorageType, MAX_CHUNK_COUNT};

/// Output of [`encode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedItem {
    /// Master entry first, then chunks in ascending index order
    pub entries: Vec<StorageEntry>,

    /// Storage type actually applied
    pub storage_type: StorageType,

    /// UTF-8 length of the serialized value
    pub raw_size: usize,

    /// UTF-8 length of the value after optional compression
    pub processed_size: usize,
}

impl EncodedItem {
    /// Number of chunk entries (excludes the master)
    pub fn chunk_count(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }
}

/// Encode `serialized` for storage under `key`
///
/// `storage_type` defaults to [`StorageType::Compressed`]. The processed
/// value is always chunked, even when it fits in a single chunk, so reads
/// never special-case a direct value. Fails with `ValueTooLarge` when the
/// value would need more than [`MAX_CHUNK_COUNT`] chunks.
pub fn encode(
    key: &str,
    serialized: &str,
    storage_type: Option<StorageType>,
    chunk_size: NonZeroUsize,
    compressor: &dyn Compressor,
) -> Result<EncodedItem> {
    let storage_type = storage_type.unwrap_or_default();
    let raw_size = serialized.len();

    let compressed;
    let processed: &str = match storage_type {
        StorageType::Compressed => {
            compressed = compressor.compress(serialized)?;
            &compressed
        }
        StorageType::Uncompressed => serialized,
    };
    let processed_size = processed.len();

    let chunks = split(processed, chunk_size);
    if chunks.len() > MAX_CHUNK_COUNT {
        return Err(StoreError::ValueTooLarge {
            key: key.to_string(),
            chunk_count: chunks.len(),
            limit: MAX_CHUNK_COUNT,
        });
    }
    let metadata = MasterMetadata::new(storage_type, chunks.len());

    let mut entries = Vec::with_capacity(chunks.len() + 1);
    entries.push(StorageEntry::new(master_key(key), metadata.to_json()?));
    entries.extend(
        chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| StorageEntry::new(chunk_key(key, index), *chunk)),
    );

    Ok(EncodedItem {
        entries,
        storage_type,
        raw_size,
        processed_size,
    })
}
