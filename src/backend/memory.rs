//! In-memory backend
//!
//! HashMap behind a `parking_lot::RwLock`. Clones share the same map, so a
//! test can hand one clone to the store and inspect the other.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::BackendError;

use super::{Backend, BackendResult};

/// In-memory key-value primitive
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    data: RwLock<HashMap<String, String>>,

    /// Per-entry value ceiling in bytes, `None` for unbounded
    max_value_size: Option<usize>,

    /// Keys whose calls are refused, per operation
    failing: RwLock<FailureSet>,

    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

#[derive(Default)]
struct FailureSet {
    gets: HashSet<String>,
    sets: HashSet<String>,
    deletes: HashSet<String>,
}

impl MemoryBackend {
    /// Create an empty, unbounded backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend that rejects values over `limit` bytes
    pub fn with_max_value_size(limit: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                max_value_size: Some(limit),
                ..Inner::default()
            }),
        }
    }

    // =========================================================================
    // Failure Injection
    // =========================================================================

    /// Make every `get` of `key` fail
    pub fn fail_gets_for(&self, key: impl Into<String>) {
        self.inner.failing.write().gets.insert(key.into());
    }

    /// Make every `set` of `key` fail
    pub fn fail_sets_for(&self, key: impl Into<String>) {
        self.inner.failing.write().sets.insert(key.into());
    }

    /// Make every `delete` of `key` fail
    pub fn fail_deletes_for(&self, key: impl Into<String>) {
        self.inner.failing.write().deletes.insert(key.into());
    }

    /// Stop injecting failures
    pub fn clear_failures(&self) {
        *self.inner.failing.write() = FailureSet::default();
    }

    // =========================================================================
    // Raw Access (bypasses counters and failure injection)
    // =========================================================================

    pub fn raw_get(&self, key: &str) -> Option<String> {
        self.inner.data.read().get(key).cloned()
    }

    pub fn raw_set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.data.write().insert(key.into(), value.into());
    }

    pub fn raw_remove(&self, key: &str) -> Option<String> {
        self.inner.data.write().remove(key)
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.inner.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.data.read().is_empty()
    }

    // =========================================================================
    // Call Counters
    // =========================================================================

    pub fn get_calls(&self) -> usize {
        self.inner.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.inner.set_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.inner.delete_calls.load(Ordering::SeqCst)
    }

    pub fn reset_counters(&self) {
        self.inner.get_calls.store(0, Ordering::SeqCst);
        self.inner.set_calls.store(0, Ordering::SeqCst);
        self.inner.delete_calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get(&self, key: &str) -> BackendResult<Option<String>> {
        self.inner.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing.read().gets.contains(key) {
            return Err(BackendError::Rejected(format!("get {key}")));
        }
        Ok(self.raw_get(key))
    }

    async fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.inner.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing.read().sets.contains(key) {
            return Err(BackendError::Rejected(format!("set {key}")));
        }
        if let Some(limit) = self.inner.max_value_size {
            if value.len() > limit {
                return Err(BackendError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    limit,
                });
            }
        }
        self.raw_set(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> BackendResult<()> {
        self.inner.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing.read().deletes.contains(key) {
            return Err(BackendError::Rejected(format!("delete {key}")));
        }
        self.raw_remove(key);
        Ok(())
    }
}
