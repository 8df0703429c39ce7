//! Log level definitions
//!
//! Two closely related types live here:
//! - [`LogLevel`]: the four levels a record can be emitted at
//! - [`LevelFilter`]: a minimum-level threshold, which adds `Silent`
//!
//! `Silent` only ever configures a sink. It has no `LogLevel` counterpart, so
//! emitting at it cannot be expressed.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    /// Lowercase label, as written to the `level` key of JSON records
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Uppercase label used by the pretty renderer
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<LevelFilter>()? {
            LevelFilter::Silent => Err(LoggerError::SilentLevel),
            filter => LogLevel::try_from(filter),
        }
    }
}

impl TryFrom<LevelFilter> for LogLevel {
    type Error = LoggerError;

    fn try_from(filter: LevelFilter) -> Result<Self, LoggerError> {
        match filter {
            LevelFilter::Debug => Ok(LogLevel::Debug),
            LevelFilter::Info => Ok(LogLevel::Info),
            LevelFilter::Warn => Ok(LogLevel::Warn),
            LevelFilter::Error => Ok(LogLevel::Error),
            LevelFilter::Silent => Err(LoggerError::SilentLevel),
        }
    }
}

/// Minimum level a sink lets through
///
/// Ordered by how much output it excludes: `Debug` lets everything through,
/// `Silent` lets nothing through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LevelFilter {
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Silent = 5,
}

impl LevelFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelFilter::Debug => "debug",
            LevelFilter::Info => "info",
            LevelFilter::Warn => "warn",
            LevelFilter::Error => "error",
            LevelFilter::Silent => "silent",
        }
    }

    /// Whether a record at `level` passes this threshold
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        LevelFilter::from(level) >= *self
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelFilter {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" | "warning" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            "silent" => Ok(LevelFilter::Silent),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

impl TryFrom<String> for LevelFilter {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, LoggerError> {
        s.parse()
    }
}

impl From<LevelFilter> for String {
    fn from(filter: LevelFilter) -> Self {
        filter.as_str().to_string()
    }
}
