//! Chunking Module
//!
//! Turns a serialized value into the write-set for one generation and back.
//!
//! ## Responsibilities
//! - Split text into size-bounded chunks without breaking UTF-8 characters
//! - Rejoin chunks in index order
//! - Decide compression and build the master + chunk entries
//!
//! ## Write-Set Layout
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ entries[0]   {key}_master   MasterMetadata   │
//! ├──────────────────────────────────────────────┤
//! │ entries[1]   {key}_chunk_0  bytes [0, n0)    │
//! │ entries[2]   {key}_chunk_1  bytes [n0, n1)   │
//! │ ...          (one per chunk, ascending)      │
//! └──────────────────────────────────────────────┘
//! ```

mod codec;
mod encoder;
mod metadata;

pub use codec::{join, split};
pub use encoder::{encode, EncodedItem};
pub use metadata::{MasterMetadata, StorageEntry, StorageType, MAX_CHUNK_COUNT};
