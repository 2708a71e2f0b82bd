//! Logging capability
//!
//! The store never calls `tracing` directly; it reports through an injected
//! [`Logger`] so embedders can route messages wherever they like.
//! [`TracingLogger`] is the bridge used by the CLI.

use serde_json::Value;

/// Four-level logging capability injected through [`crate::Config`]
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, context: &Value);
    fn info(&self, message: &str, context: &Value);
    fn warn(&self, message: &str, context: &Value);
    fn error(&self, message: &str, context: &Value);
}

/// Discards everything. Installed until the config is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _context: &Value) {}
    fn info(&self, _message: &str, _context: &Value) {}
    fn warn(&self, _message: &str, _context: &Value) {}
    fn error(&self, _message: &str, _context: &Value) {}
}

/// Forwards to the `tracing` macros, context as a structured field
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str, context: &Value) {
        tracing::debug!(target: "chunkstore", context = %context, "{}", message);
    }

    fn info(&self, message: &str, context: &Value) {
        tracing::info!(target: "chunkstore", context = %context, "{}", message);
    }

    fn warn(&self, message: &str, context: &Value) {
        tracing::warn!(target: "chunkstore", context = %context, "{}", message);
    }

    fn error(&self, message: &str, context: &Value) {
        tracing::error!(target: "chunkstore", context = %context, "{}", message);
    }
}
