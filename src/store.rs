//! Store Module
//!
//! The orchestrator that maps logical items onto the backend.
//!
//! ## Responsibilities
//! - Validate keys before touching the backend
//! - Replace the previous generation of an item on write
//! - Fan chunk reads/writes/deletes out concurrently and fan them back in
//! - Downgrade chunk-level data loss to a logged miss
//!
//! ## Consistency Model
//!
//! There is no cross-key transaction and no locking in this layer:
//!
//! - A write deletes the prior generation, then issues the master and chunk
//!   writes concurrently. A failed write is not rolled back.
//! - A reader racing a writer of the same key may see a master whose chunks
//!   are not all present yet; that read reports `PartialData`.
//! - Concurrent writers of one key must be serialized by the caller.

use std::iter;
use std::sync::Arc;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::backend::Backend;
use crate::chunking::{encode, join, MasterMetadata, StorageEntry, StorageType};
use crate::compression::{CompressionStats, Compressor, ZstdCompressor};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::keys::{master_key, validate_key};
use crate::logging::Logger;

/// Result of a read that did not hit a hard error
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    /// The item was reassembled and parsed
    Found(T),

    /// The item is absent or unreadable
    NotFound(MissReason),
}

/// Why a read produced no value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissReason {
    /// No master entry: never written, or deleted
    Absent,

    /// The master names chunks the backend does not have
    PartialData { missing: Vec<usize> },

    /// The reassembled payload is not a valid compressed payload
    DecompressionFailed,
}

impl<T> ReadOutcome<T> {
    /// Collapse to `Option`, dropping the miss reason
    pub fn into_option(self) -> Option<T> {
        match self {
            ReadOutcome::Found(value) => Some(value),
            ReadOutcome::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ReadOutcome::Found(_))
    }

    pub fn miss_reason(&self) -> Option<&MissReason> {
        match self {
            ReadOutcome::Found(_) => None,
            ReadOutcome::NotFound(reason) => Some(reason),
        }
    }
}

/// Chunked, optionally compressed item store over a [`Backend`]
pub struct ChunkedStore<B> {
    /// The primitive key-value store
    backend: B,

    /// Shared settings (chunk size, logger)
    config: Arc<Config>,

    /// Codec for `StorageType::Compressed`
    compressor: Arc<dyn Compressor>,
}

impl<B: Backend> ChunkedStore<B> {
    /// Create a store using the default zstd codec
    pub fn new(backend: B, config: Arc<Config>) -> Self {
        Self {
            backend,
            config,
            compressor: Arc::new(ZstdCompressor::default()),
        }
    }

    /// Replace the compression codec
    pub fn with_compressor(mut self, compressor: Arc<dyn Compressor>) -> Self {
        self.compressor = compressor;
        self
    }

    /// Store `value` under `key`, replacing any previous generation
    ///
    /// `storage_type` defaults to compressed. If any backend write fails the
    /// whole call fails; entries already written are left in place.
    pub async fn set_item<T>(
        &self,
        key: &str,
        value: &T,
        storage_type: Option<StorageType>,
    ) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let logger = self.config.logger();
        let result = self.write_generation(key, value, storage_type, logger.as_ref()).await;
        if let Err(e) = &result {
            logger.error("set_item", &json!({ "key": key, "error": e.to_string() }));
        }
        result
    }

    /// Read and reassemble the item under `key`
    ///
    /// Missing master: `NotFound(Absent)`. Missing chunks or an undecodable
    /// compressed payload: logged, then `NotFound`. Unparseable master or
    /// final payload: `Err`.
    pub async fn get_item<T>(&self, key: &str) -> Result<ReadOutcome<T>>
    where
        T: DeserializeOwned,
    {
        let logger = self.config.logger();

        let Some(text) = self.fetch(master_key(key)).await? else {
            logger.debug("get_item", &json!({ "key": key, "message": "No data found" }));
            return Ok(ReadOutcome::NotFound(MissReason::Absent));
        };
        let metadata = MasterMetadata::parse(key, &text)?;

        // try_join_all keeps results in chunk order regardless of completion order
        let chunks = try_join_all(metadata.chunk_keys(key).map(|k| self.fetch(k))).await?;

        let missing: Vec<usize> = chunks
            .iter()
            .enumerate()
            .filter_map(|(index, chunk)| chunk.is_none().then_some(index))
            .collect();
        if !missing.is_empty() {
            logger.error(
                "get_item",
                &json!({ "key": key, "message": "One or more chunks missing", "missing": missing }),
            );
            return Ok(ReadOutcome::NotFound(MissReason::PartialData { missing }));
        }

        let payload = join(chunks.into_iter().flatten());
        let serialized = match metadata.storage_type {
            StorageType::Compressed => match self.compressor.decompress(&payload) {
                Some(text) => text,
                None => {
                    logger.error(
                        "get_item",
                        &json!({ "key": key, "message": "Failed to decompress payload" }),
                    );
                    return Ok(ReadOutcome::NotFound(MissReason::DecompressionFailed));
                }
            },
            StorageType::Uncompressed => payload,
        };

        let value = serde_json::from_str(&serialized).map_err(|source| StoreError::CorruptValue {
            key: key.to_string(),
            source,
        })?;
        Ok(ReadOutcome::Found(value))
    }

    /// Delete the item under `key` and every chunk its master names
    ///
    /// Deleting an absent item succeeds. A failed delete is not rolled back.
    pub async fn delete_item(&self, key: &str) -> Result<()> {
        let logger = self.config.logger();
        let result = async {
            validate_key(key)?;
            self.delete_generation(key, logger.as_ref()).await
        }
        .await;
        if let Err(e) = &result {
            logger.error("delete_item", &json!({ "key": key, "error": e.to_string() }));
        }
        result
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Validate, encode, clear the old generation, write the new one
    async fn write_generation<T>(
        &self,
        key: &str,
        value: &T,
        storage_type: Option<StorageType>,
        logger: &dyn Logger,
    ) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        validate_key(key)?;

        // Encode before deleting: a value that fails to encode leaves the
        // old generation in place
        let serialized = serde_json::to_string(value)?;
        let encoded = encode(
            key,
            &serialized,
            storage_type,
            self.config.chunk_size(),
            self.compressor.as_ref(),
        )?;

        self.delete_generation(key, logger).await?;

        let stats = CompressionStats::new(encoded.raw_size, encoded.processed_size);
        logger.debug(
            "set_item",
            &json!({
                "key": key,
                "storageType": encoded.storage_type,
                "entryCount": encoded.entries.len(),
                "rawSize": stats.raw_size,
                "processedSize": stats.processed_size,
                "ratio": stats.ratio,
            }),
        );

        try_join_all(encoded.entries.iter().map(|entry| self.store(entry))).await?;
        Ok(())
    }

    /// Remove the generation currently named by the master of `key`
    async fn delete_generation(&self, key: &str, logger: &dyn Logger) -> Result<()> {
        let master = master_key(key);
        let Some(text) = self.fetch(master.clone()).await? else {
            logger.debug(
                "delete_item",
                &json!({ "key": key, "message": "No data found to delete" }),
            );
            return Ok(());
        };
        let metadata = MasterMetadata::parse(key, &text)?;

        let doomed = iter::once(master).chain(metadata.chunk_keys(key));
        try_join_all(doomed.map(|k| self.remove(k))).await?;
        Ok(())
    }

    async fn fetch(&self, key: String) -> Result<Option<String>> {
        self.backend
            .get(&key)
            .await
            .map_err(|e| StoreError::backend(key, e))
    }

    async fn store(&self, entry: &StorageEntry) -> Result<()> {
        self.backend
            .set(&entry.key, &entry.value)
            .await
            .map_err(|e| StoreError::backend(entry.key.as_str(), e))
    }

    async fn remove(&self, key: String) -> Result<()> {
        self.backend
            .delete(&key)
            .await
            .map_err(|e| StoreError::backend(key, e))
    }
}
