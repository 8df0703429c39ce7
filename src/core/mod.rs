//! Core logger types and traits

pub mod appender;
pub mod classify;
pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metadata;
pub mod metrics;
pub mod noop;
pub mod payload;
pub mod port;
pub mod record;
pub mod record_sink;
pub mod sink;

pub use appender::Appender;
pub use classify::{classify, Classified};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use log_level::{LevelFilter, LogLevel};
pub use logger::Logger;
pub use metadata::{Bindings, ErrorValue, FieldValue, Metadata, ERROR_KEY};
pub use metrics::SinkMetrics;
pub use noop::NoopLogger;
pub use payload::{shape, OutputMode, Payload, META_KEY};
pub use port::LoggerPort;
pub use record::{LogRecord, RecordFormat};
pub use record_sink::{RecordSink, RecordSinkBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use sink::{Destination, Sink};
