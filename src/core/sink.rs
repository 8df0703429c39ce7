//! The capability a logger needs from whatever ships its records

use super::log_level::LogLevel;
use super::metadata::Bindings;
use super::payload::Payload;
use std::path::PathBuf;
use std::sync::Arc;

/// Receiver of shaped log calls
///
/// A sink decides what to do with a record: filter it by level, render it,
/// write or ship it. It owns its own buffering and thread safety.
pub trait Sink: Send + Sync {
    /// Handle one record; the message always travels separately from the payload
    fn emit(&self, level: LogLevel, payload: Payload, message: &str);

    /// A sink that adds `bindings` to every record, on top of this sink's own
    fn with_bindings(&self, bindings: &Bindings) -> Arc<dyn Sink>;
}

/// Where a configured sink writes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Stdout,
    Stderr,
    File(PathBuf),
}
