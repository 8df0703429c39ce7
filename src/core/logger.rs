//! Logger facade
//!
//! [`Logger`] classifies each call's metadata, shapes the payload for its
//! output mode, and hands the result to a [`Sink`]. It holds no mutable
//! state: repeated identical calls produce identical payloads.

use super::{
    classify::classify,
    config::LoggerConfig,
    error::Result,
    log_level::{LevelFilter, LogLevel},
    metadata::{Bindings, Metadata},
    payload::{shape, OutputMode},
    port::LoggerPort,
    record_sink::RecordSink,
    sink::{Destination, Sink},
};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
    mode: OutputMode,
}

impl Logger {
    #[must_use]
    pub fn new<S: Sink + 'static>(sink: S, mode: OutputMode) -> Self {
        Self::from_shared(Arc::new(sink), mode)
    }

    #[must_use]
    pub fn from_shared(sink: Arc<dyn Sink>, mode: OutputMode) -> Self {
        Self { sink, mode }
    }

    /// Logger over a [`RecordSink`] configured for `destination`
    pub fn configure(
        min_level: LevelFilter,
        mode: OutputMode,
        destination: Destination,
    ) -> Result<Self> {
        let sink = RecordSink::configure(min_level, mode, destination)?;
        Ok(Self::new(sink, mode))
    }

    /// Logger writing to stdout as `config` describes
    ///
    /// # Example
    ///
    /// ```
    /// use logger_port::prelude::*;
    ///
    /// let logger = Logger::from_config(&LoggerConfig::new(LevelFilter::Debug, true)).unwrap();
    /// assert_eq!(logger.mode(), OutputMode::Human);
    /// logger.debug("Pretty debug", Some(metadata! { "userId" => 123 }));
    /// ```
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        Self::configure(config.level, config.output_mode(), Destination::Stdout)
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Concrete-typed counterpart of [`LoggerPort::child`]
    #[must_use]
    pub fn child_logger(&self, bindings: &Bindings) -> Logger {
        Logger {
            sink: self.sink.with_bindings(bindings),
            mode: self.mode,
        }
    }
}

impl LoggerPort for Logger {
    fn log(&self, level: LogLevel, message: &str, meta: Option<Metadata>) {
        let payload = shape(classify(meta), self.mode);
        self.sink.emit(level, payload, message);
    }

    fn child(&self, bindings: Bindings) -> Box<dyn LoggerPort> {
        Box::new(self.child_logger(&bindings))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("mode", &self.mode).finish_non_exhaustive()
    }
}
