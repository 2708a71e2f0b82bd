//! # chunkstore
//!
//! A logical item store layered over a primitive key-value backend whose
//! values are small, with:
//! - Optional compression of each value (zstd, carried as base64 text)
//! - UTF-8-safe chunking of values into size-bounded entries
//! - A master metadata entry per item describing how to reassemble it
//! - Concurrent fan-out of chunk reads, writes, and deletes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ChunkedStore                              │
//! │             (set_item / get_item / delete_item)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Keys     │          │  Chunking   │
//!   │ (namespace) │          │ (encode +   │
//!   └─────────────┘          │  split/join)│
//!                            └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │   Backend   │
//!                           │ (get/set/   │
//!                           │  delete)    │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod logging;

pub mod keys;
pub mod chunking;
pub mod compression;
pub mod backend;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BackendError, Result, StoreError};
pub use config::{Config, ConfigOptions};
pub use logging::{Logger, NoopLogger, TracingLogger};
pub use chunking::{MasterMetadata, StorageEntry, StorageType};
pub use backend::{Backend, FileBackend, MemoryBackend};
pub use store::{ChunkedStore, MissReason, ReadOutcome};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of chunkstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
