//! No-operation logger implementation

use super::log_level::LogLevel;
use super::metadata::{Bindings, Metadata};
use super::port::LoggerPort;

/// A logger that discards everything
///
/// `child` hands back another `NoopLogger`; there is no state to carry.
///
/// # Example
///
/// ```
/// use logger_port::{LoggerPort, NoopLogger};
/// use std::sync::Arc;
///
/// let logger: Arc<dyn LoggerPort> = Arc::new(NoopLogger);
/// logger.info("This message is discarded", None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _message: &str, _meta: Option<Metadata>) {}

    fn child(&self, _bindings: Bindings) -> Box<dyn LoggerPort> {
        Box::new(*self)
    }
}
