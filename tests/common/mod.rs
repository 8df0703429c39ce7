//! Shared test sink that records every emission verbatim

#![allow(dead_code)]

use logger_port::{Bindings, LogLevel, Payload, Sink};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub level: LogLevel,
    pub payload: Payload,
    pub message: String,
    pub bindings: Bindings,
}

impl Emission {
    pub fn payload_value(&self) -> Value {
        Value::Object(self.payload.clone())
    }
}

/// Sink that keeps what it receives; children share the log, not the bindings
#[derive(Clone, Default)]
pub struct CaptureSink {
    bindings: Bindings,
    emissions: Arc<Mutex<Vec<Emission>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().clone()
    }

    pub fn last(&self) -> Emission {
        self.emissions
            .lock()
            .last()
            .cloned()
            .expect("nothing was emitted")
    }
}

impl Sink for CaptureSink {
    fn emit(&self, level: LogLevel, payload: Payload, message: &str) {
        self.emissions.lock().push(Emission {
            level,
            payload,
            message: message.to_string(),
            bindings: self.bindings.clone(),
        });
    }

    fn with_bindings(&self, bindings: &Bindings) -> Arc<dyn Sink> {
        Arc::new(CaptureSink {
            bindings: self.bindings.merged(bindings),
            emissions: Arc::clone(&self.emissions),
        })
    }
}

/// Parse a JSON-lines log file
pub fn read_records(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(|line| serde_json::from_str(line).expect("log line is not JSON"))
        .collect()
}
