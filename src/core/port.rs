//! The logger capability callers depend on

use super::log_level::LogLevel;
use super::metadata::{Bindings, Metadata};

/// Logging interface for application components
///
/// Anything offering these operations can stand in for a logger, including
/// [`NoopLogger`](super::NoopLogger). Implementations must be `Send + Sync`
/// so one logger and its children can be shared across threads.
///
/// # Example
///
/// ```
/// use logger_port::{metadata, LoggerPort, NoopLogger};
/// use std::sync::Arc;
///
/// struct Checkout {
///     logger: Arc<dyn LoggerPort>,
/// }
///
/// impl Checkout {
///     fn place_order(&self, order_id: u64) {
///         self.logger.info("Order placed", Some(metadata! { "orderId" => order_id }));
///     }
/// }
///
/// let checkout = Checkout { logger: Arc::new(NoopLogger) };
/// checkout.place_order(42);
/// ```
pub trait LoggerPort: Send + Sync {
    /// Log `message` at `level` with optional per-call metadata
    ///
    /// The four level methods delegate here.
    fn log(&self, level: LogLevel, message: &str, meta: Option<Metadata>);

    /// A logger whose records also carry `bindings`, on top of this logger's own
    ///
    /// `self` is left unchanged.
    fn child(&self, bindings: Bindings) -> Box<dyn LoggerPort>;

    fn debug(&self, message: &str, meta: Option<Metadata>) {
        self.log(LogLevel::Debug, message, meta);
    }

    fn info(&self, message: &str, meta: Option<Metadata>) {
        self.log(LogLevel::Info, message, meta);
    }

    fn warn(&self, message: &str, meta: Option<Metadata>) {
        self.log(LogLevel::Warn, message, meta);
    }

    fn error(&self, message: &str, meta: Option<Metadata>) {
        self.log(LogLevel::Error, message, meta);
    }
}
