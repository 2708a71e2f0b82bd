//! File backend
//!
//! Each key is one file directly under the root directory:
//!
//! ```text
//! {root}/
//!   ├── user_data_master
//!   ├── user_data_chunk_0
//!   └── user_data_chunk_1
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::BackendError;

use super::{Backend, BackendResult};

/// Directory-backed key-value primitive
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open or create a backend rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> BackendResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to its file, refusing anything that is not a plain name
    fn path_for(&self, key: &str) -> BackendResult<PathBuf> {
        let safe = !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if !safe {
            return Err(BackendError::UnsafeKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl Backend for FileBackend {
    async fn get(&self, key: &str) -> BackendResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        let path = self.path_for(key)?;
        // Write-then-rename keeps each key atomic
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> BackendResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
