//! Compression support for stored payloads
//!
//! Backends hold text, so compressed frames are carried as base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Result, StoreError};

/// Text-to-text compression codec
pub trait Compressor: Send + Sync {
    /// Compress `text` into a text payload
    fn compress(&self, text: &str) -> Result<String>;

    /// Reverse of `compress`; `None` when the input is not a valid payload
    fn decompress(&self, text: &str) -> Option<String>;
}

/// zstd frames, base64 encoded
#[derive(Debug, Clone, Copy)]
pub struct ZstdCompressor {
    level: i32,
}

impl ZstdCompressor {
    pub const DEFAULT_LEVEL: i32 = 3;

    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEVEL)
    }
}

impl Compressor for ZstdCompressor {
    fn compress(&self, text: &str) -> Result<String> {
        let frame = zstd::encode_all(text.as_bytes(), self.level)
            .map_err(|e| StoreError::Compression(format!("Failed to compress: {}", e)))?;
        Ok(STANDARD.encode(frame))
    }

    fn decompress(&self, text: &str) -> Option<String> {
        let frame = STANDARD.decode(text).ok()?;
        let bytes = zstd::decode_all(frame.as_slice()).ok()?;
        String::from_utf8(bytes).ok()
    }
}

/// Compression statistics for one encoded value
#[derive(Debug, Clone, Copy)]
pub struct CompressionStats {
    pub raw_size: usize,
    pub processed_size: usize,
    pub ratio: f64,
}

impl CompressionStats {
    pub fn new(raw_size: usize, processed_size: usize) -> Self {
        let ratio = if raw_size > 0 {
            processed_size as f64 / raw_size as f64
        } else {
            1.0
        };
        Self {
            raw_size,
            processed_size,
            ratio,
        }
    }
}
