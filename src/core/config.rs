//! Logger configuration
//!
//! Mirrors the two settings a process hands its logger: the minimum level and
//! whether output is pretty-printed for humans.

use super::error::{LoggerError, Result};
use super::log_level::LevelFilter;
use super::payload::OutputMode;
use serde::{Deserialize, Serialize};

pub const LEVEL_ENV: &str = "LOG_LEVEL";
pub const PRETTY_ENV: &str = "LOG_PRETTY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Minimum level the sink lets through
    pub level: LevelFilter,
    /// Human-readable output instead of JSON lines
    pub pretty_print: bool,
}

impl LoggerConfig {
    pub fn new(level: LevelFilter, pretty_print: bool) -> Self {
        Self {
            level,
            pretty_print,
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_pretty(self.pretty_print)
    }

    /// Parse from a JSON document such as `{"level":"debug","prettyPrint":true}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `LOG_LEVEL` and `LOG_PRETTY`; unset variables keep their defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(LEVEL_ENV) {
            config.level = level
                .parse()
                .map_err(|e: LoggerError| LoggerError::config(LEVEL_ENV, e.to_string()))?;
        }

        if let Some(pretty) = lookup(PRETTY_ENV) {
            config.pretty_print = parse_flag(&pretty)
                .ok_or_else(|| LoggerError::config(PRETTY_ENV, format!("expected a boolean, got '{}'", pretty)))?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
