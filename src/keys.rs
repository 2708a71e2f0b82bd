//! Key Namespace
//!
//! Every logical item occupies one master key plus one key per chunk:
//!
//! ```text
//! user_data            (caller key, never stored directly)
//! user_data_master     {"storageType":"COMPRESSED","chunkCount":2}
//! user_data_chunk_0    first chunk
//! user_data_chunk_1    second chunk
//! ```
//!
//! Caller keys are restricted so they can never collide with derived keys.

use crate::error::{Result, StoreError};

/// Suffix appended to a user key to form its master key
pub const MASTER_SUFFIX: &str = "_master";

/// Infix between a user key and a chunk ordinal
pub const CHUNK_INFIX: &str = "_chunk_";

/// Check that `key` is a legal user key
///
/// Rejects empty keys, keys that look like derived keys, and any
/// character outside `[A-Za-z0-9_]`.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(invalid(key, "key must be a non-empty string"));
    }

    if key.ends_with(MASTER_SUFFIX) || key.contains(CHUNK_INFIX) {
        return Err(invalid(key, "key cannot end with _master or contain _chunk_"));
    }

    if !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(invalid(
            key,
            "key can only contain alphanumeric characters and underscores",
        ));
    }

    Ok(())
}

/// Key holding the master metadata for `key`
pub fn master_key(key: &str) -> String {
    format!("{key}{MASTER_SUFFIX}")
}

/// Key holding chunk `index` (zero-based) of `key`
pub fn chunk_key(key: &str, index: usize) -> String {
    format!("{key}{CHUNK_INFIX}{index}")
}

fn invalid(key: &str, reason: &'static str) -> StoreError {
    StoreError::InvalidKey {
        key: key.to_string(),
        reason,
    }
}
