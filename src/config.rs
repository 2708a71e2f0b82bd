//! Configuration for chunkstore
//!
//! A single [`Config`] is created at startup, configured at most once, and
//! shared (`Arc<Config>`) with every [`crate::ChunkedStore`] that uses it.
//! Reading before it is configured yields the defaults.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Result, StoreError};
use crate::logging::{Logger, NoopLogger};

/// Chunk size used until configured (bytes)
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

/// Process-wide settings with set-once semantics
pub struct Config {
    state: RwLock<State>,
}

struct State {
    /// Flipped by the first successful `configure` call
    configured: bool,

    /// Sink for store diagnostics
    logger: Arc<dyn Logger>,

    /// Target size of each chunk in bytes
    chunk_size: NonZeroUsize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            configured: false,
            logger: Arc::new(NoopLogger),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_chunk_size() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN)
}

impl Config {
    /// Create an unconfigured instance holding the defaults
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Create and immediately configure an instance
    pub fn with_options(options: ConfigOptions) -> Result<Self> {
        let config = Self::new();
        config.configure(options)?;
        Ok(config)
    }

    /// Apply options. Only the first successful call takes effect.
    ///
    /// Fails with `AlreadyConfigured` on any later call and with
    /// `InvalidChunkSize` for a zero chunk size; a rejected call leaves the
    /// current settings untouched.
    pub fn configure(&self, options: ConfigOptions) -> Result<()> {
        let mut state = self.state.write();
        if state.configured {
            return Err(StoreError::AlreadyConfigured);
        }

        if let Some(size) = options.chunk_size {
            state.chunk_size = NonZeroUsize::new(size).ok_or(StoreError::InvalidChunkSize(size))?;
        }
        if let Some(logger) = options.logger {
            state.logger = logger;
        }
        state.configured = true;
        Ok(())
    }

    /// Whether `configure` has succeeded
    pub fn is_configured(&self) -> bool {
        self.state.read().configured
    }

    /// Current logger
    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::clone(&self.state.read().logger)
    }

    /// Current chunk size in bytes
    pub fn chunk_size(&self) -> NonZeroUsize {
        self.state.read().chunk_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Config")
            .field("configured", &state.configured)
            .field("chunk_size", &state.chunk_size)
            .finish_non_exhaustive()
    }
}

/// Options accepted by [`Config::configure`]; unset fields keep their value
#[derive(Default, Clone)]
pub struct ConfigOptions {
    pub logger: Option<Arc<dyn Logger>>,
    pub chunk_size: Option<usize>,
}

impl ConfigOptions {
    /// Create a new options builder
    pub fn builder() -> ConfigOptionsBuilder {
        ConfigOptionsBuilder::default()
    }
}

/// Builder for ConfigOptions
#[derive(Default)]
pub struct ConfigOptionsBuilder {
    options: ConfigOptions,
}

impl ConfigOptionsBuilder {
    /// Set the logger that receives store diagnostics
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.options.logger = Some(logger);
        self
    }

    /// Set the chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.options.chunk_size = Some(size);
        self
    }

    pub fn build(self) -> ConfigOptions {
        self.options
    }
}
