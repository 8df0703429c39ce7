//! Logging macros for ergonomic message formatting and metadata.
//!
//! # Examples
//!
//! ```
//! use logger_port::prelude::*;
//! use logger_port::{error, info};
//!
//! let logger = NoopLogger;
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With metadata fields ahead of the message
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! error!(logger, { "error" => FieldValue::error(&err), "port" => port }, "Write failed");
//! ```

/// Build a [`Metadata`](crate::Metadata) bag.
///
/// # Examples
///
/// ```
/// use logger_port::{metadata, FieldValue};
///
/// let meta = metadata! { "feature" => "test", "userId" => 123 };
/// assert_eq!(meta.get("userId"), Some(&FieldValue::Int(123)));
///
/// let empty = metadata! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut meta = $crate::Metadata::new();
        $( meta.add_field($key, $value); )+
        meta
    }};
}

/// Log a formatted message at a given level, with optional fields.
///
/// # Examples
///
/// ```
/// # use logger_port::prelude::*;
/// # let logger = NoopLogger;
/// use logger_port::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, { "attempt" => 3 }, "Retrying {}", "upload");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {{
        use $crate::LoggerPort as _;
        $logger.log($level, &format!($($arg)+), Some($crate::metadata!($($key => $value),*)))
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::LoggerPort as _;
        $logger.log($level, &format!($($arg)+), None)
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use logger_port::prelude::*;
/// # let logger = NoopLogger;
/// use logger_port::debug;
/// debug!(logger, "Counter value: {}", 10);
/// debug!(logger, { "cache" => "miss" }, "Lookup for {}", "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, { $($fields:tt)* }, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, { $($fields)* }, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use logger_port::prelude::*;
/// # let logger = NoopLogger;
/// use logger_port::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, { $($fields:tt)* }, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, { $($fields)* }, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use logger_port::prelude::*;
/// # let logger = NoopLogger;
/// use logger_port::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, { $($fields:tt)* }, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, { $($fields)* }, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use logger_port::prelude::*;
/// # let logger = NoopLogger;
/// use logger_port::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, { "error" => ErrorValue::new("refused") }, "Code: {}", 500);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, { $($fields:tt)* }, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, { $($fields)* }, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
