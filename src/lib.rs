//! # Logger Port
//!
//! A logging capability decoupled from the sink that ships its records, plus
//! the policy that turns a caller's metadata into the payload a sink gets.
//!
//! ## Features
//!
//! - **Port, not framework**: code depends on [`LoggerPort`]; swap in
//!   [`NoopLogger`] or any other implementation without touching call sites
//! - **Error-aware metadata**: an error under the `error` key is promoted and
//!   normalized to `{ message, stack }`
//! - **Two output modes**: structured (caller fields nested under `meta`) or
//!   human (fields flattened for inline display)
//! - **Child loggers**: bindings accumulate down a tree of children
//! - **Appender-backed sink**: console and file output, JSON lines or pretty
//!   single lines, optional async queue
//!
//! ## Example
//!
//! ```
//! use logger_port::prelude::*;
//!
//! let logger = Logger::configure(LevelFilter::Debug, OutputMode::Structured, Destination::Stdout)?;
//!
//! let auth = logger.child(metadata! { "service" => "auth" });
//! auth.info("User signed in", Some(metadata! { "userId" => 789 }));
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        Appender, Bindings, Destination, ErrorValue, FieldValue, LevelFilter, LogLevel, LogRecord,
        Logger, LoggerConfig, LoggerError, LoggerPort, Metadata, NoopLogger, OutputMode,
        RecordFormat, RecordSink, RecordSinkBuilder, Result, Sink, SinkMetrics,
    };
    pub use crate::metadata;
}

pub use crate::appenders::{ConsoleAppender, FileAppender};
pub use crate::core::{
    classify, shape, Appender, Bindings, Classified, Destination, ErrorValue, FieldValue,
    LevelFilter, LogLevel, LogRecord, Logger, LoggerConfig, LoggerError, LoggerPort, Metadata,
    NoopLogger, OutputMode, Payload, RecordFormat, RecordSink, RecordSinkBuilder, Result, Sink,
    SinkMetrics, DEFAULT_SHUTDOWN_TIMEOUT, ERROR_KEY, META_KEY,
};
