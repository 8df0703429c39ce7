//! Finished log records and how they are rendered
//!
//! A [`LogRecord`] is what a sink hands to its appenders: the level, the
//! time, the logger's bindings, the shaped payload, and the message.
//! [`RecordFormat`] turns it into one line of output:
//! - Json: `{"level":"info","msg":"Request processed","time":1736332245000,...}`
//! - Pretty: `INFO  [10:30:45]: Request processed {"userId":123}`

use super::log_level::LogLevel;
use super::payload::Payload;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
pub const MSG_KEY: &str = "msg";

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub time: DateTime<Utc>,
    pub msg: String,
    /// Accumulated bindings, shared by every record from the same logger
    pub bindings: Arc<Payload>,
    pub payload: Payload,
}

impl LogRecord {
    pub fn new(level: LogLevel, msg: impl Into<String>, payload: Payload) -> Self {
        Self {
            level,
            time: Utc::now(),
            msg: msg.into(),
            bindings: Arc::new(Payload::new()),
            payload,
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: Arc<Payload>) -> Self {
        self.bindings = bindings;
        self
    }

    /// Bindings and payload in one object; payload keys win
    pub fn fields(&self) -> Payload {
        let mut fields = (*self.bindings).clone();
        for (key, value) in &self.payload {
            fields.insert(key.clone(), value.clone());
        }
        fields
    }

    /// The record as a single JSON object
    ///
    /// `level`, `time` and `msg` are written last so caller fields cannot
    /// replace them.
    pub fn to_json_value(&self) -> Value {
        let mut obj = self.fields();
        obj.insert(
            LEVEL_KEY.to_string(),
            Value::String(self.level.as_str().to_string()),
        );
        obj.insert(
            TIME_KEY.to_string(),
            Value::Number(self.time.timestamp_millis().into()),
        );
        obj.insert(MSG_KEY.to_string(), Value::String(self.msg.clone()));
        Value::Object(obj)
    }
}

/// Replace newlines, carriage returns, and tabs with escape sequences
///
/// Keeps one record per line, so a message cannot forge extra entries.
pub fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Output format for rendered records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    /// One JSON object per line (default)
    #[default]
    Json,

    /// Single line, level first, local `HH:MM:SS` time
    Pretty { colors: bool },
}

impl RecordFormat {
    pub fn render(&self, record: &LogRecord) -> String {
        match self {
            RecordFormat::Json => self.render_json(record),
            RecordFormat::Pretty { colors } => self.render_pretty(record, *colors),
        }
    }

    fn render_json(&self, record: &LogRecord) -> String {
        // A Value built from a Map always serializes
        serde_json::to_string(&record.to_json_value()).unwrap_or_default()
    }

    fn render_pretty(&self, record: &LogRecord, colors: bool) -> String {
        let time = record
            .time
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S");

        let mut line = format!(
            "{} [{}]: {}",
            Self::level_label(record.level, colors),
            time,
            sanitize_message(&record.msg)
        );

        let fields = record.fields();
        if !fields.is_empty() {
            line.push(' ');
            line.push_str(&serde_json::to_string(&Value::Object(fields)).unwrap_or_default());
        }

        line
    }

    #[cfg(feature = "console")]
    fn level_label(level: LogLevel, colors: bool) -> String {
        use colored::Colorize;

        let label = format!("{:5}", level.label());
        if colors {
            label.color(level.color_code()).to_string()
        } else {
            label
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_label(level: LogLevel, _colors: bool) -> String {
        format!("{:5}", level.label())
    }
}
