//! Metadata values attached to log calls and child loggers
//!
//! This module provides:
//! - `FieldValue`: a single metadata value
//! - `ErrorValue`: an application error captured as data
//! - `Metadata`: the key-value bag passed per call, also used for bindings

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::btree_map::{self, BTreeMap};

/// Key under which an [`ErrorValue`] is recognized and promoted
pub const ERROR_KEY: &str = "error";

/// Value type for metadata fields
///
/// `Error` is the only variant the classifier treats as an application
/// error. A `Json` object that happens to have a `message` key is ordinary
/// data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
    Json(Value),
    Error(ErrorValue),
}

impl FieldValue {
    /// Capture `err` as an error field
    pub fn error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        FieldValue::Error(ErrorValue::from_error(err))
    }

    /// Convert to serde_json::Value for JSON serialization
    ///
    /// Non-finite floats become `null`.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::UInt(u) => Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Null => Value::Null,
            FieldValue::Json(v) => v.clone(),
            FieldValue::Error(e) => e.to_json_value(),
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            FieldValue::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Int(u as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::UInt(u)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        FieldValue::Json(v)
    }
}

impl From<ErrorValue> for FieldValue {
    fn from(e: ErrorValue) -> Self {
        FieldValue::Error(e)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// An application error carried as log data
///
/// Normalizes to `{ ...fields, message, stack }`. `stack` is always written,
/// as `null` when no backtrace was captured, so consumers can rely on the
/// key being there.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    message: String,
    stack: Option<String>,
    fields: Map<String, Value>,
}

impl ErrorValue {
    /// Create an error value from a bare message, with no stack
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
            fields: Map::new(),
        }
    }

    /// Capture an error, its `source()` chain, and a backtrace if enabled
    ///
    /// The backtrace follows `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`. The
    /// source chain lands in `causes`, outermost first.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::with_backtrace(err, Backtrace::capture())
    }

    fn with_backtrace<E>(err: &E, backtrace: Backtrace) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let stack = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        let causes: Vec<Value> = std::iter::successors(err.source(), |e| e.source())
            .map(|e| Value::String(e.to_string()))
            .collect();

        let mut fields = Map::new();
        if !causes.is_empty() {
            fields.insert("causes".to_string(), Value::Array(causes));
        }

        Self {
            message: err.to_string(),
            stack,
            fields,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Attach an extra field, e.g. an error code
    ///
    /// `message` and `stack` always come from the error itself and cannot be
    /// overridden this way.
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into().to_json_value());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let mut obj = self.fields.clone();
        obj.insert("message".to_string(), Value::String(self.message.clone()));
        obj.insert(
            "stack".to_string(),
            self.stack.clone().map(Value::String).unwrap_or(Value::Null),
        );
        Value::Object(obj)
    }
}

impl Serialize for ErrorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

/// Key-value metadata for a single log call, or bindings for a child logger
///
/// Keys are kept sorted so identical bags always render identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<String, FieldValue>,
}

/// Bindings carried by a child logger
pub type Bindings = Metadata;

impl Metadata {
    /// Create an empty bag
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field to the bag
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the bag (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Shorthand for `with_field("error", FieldValue::error(err))`
    #[must_use]
    pub fn with_error<E>(self, err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.with_field(ERROR_KEY, FieldValue::error(err))
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Overlay `other` on top of `self`; keys in `other` win
    pub fn merge(&mut self, other: &Metadata) {
        for (key, value) in &other.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Copy of `self` with `other` merged over it
    #[must_use]
    pub fn merged(&self, other: &Metadata) -> Metadata {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    /// Render every field as a JSON object
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Metadata {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fmt;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl std::error::Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_metadata_with_fields() {
        let meta = Metadata::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(meta.len(), 3);
        assert!(!meta.is_empty());
        assert_eq!(meta.get("user_id"), Some(&FieldValue::Int(123)));
    }

    #[test]
    fn test_metadata_merge_priority() {
        let parent = Metadata::new()
            .with_field("service", "api")
            .with_field("region", "eu");
        let child = Metadata::new().with_field("service", "auth");

        let merged = parent.merged(&child);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("service"), Some(&FieldValue::from("auth")));
        // The parent is untouched
        assert_eq!(parent.get("service"), Some(&FieldValue::from("api")));
    }

    #[test]
    fn test_non_finite_float_renders_null() {
        assert_eq!(FieldValue::Float(f64::NAN).to_json_value(), Value::Null);
        assert_eq!(FieldValue::Float(1.5).to_json_value(), json!(1.5));
    }

    #[test]
    fn test_option_field() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }

    #[test]
    fn test_error_value_from_error() {
        let err = Outer(Inner);
        let value = ErrorValue::from_error(&err);

        assert_eq!(value.message(), "request failed");
        assert_eq!(value.fields()["causes"], json!(["connection reset"]));
    }

    #[test]
    fn test_captured_backtrace_becomes_stack() {
        let backtrace = Backtrace::force_capture();
        assert_eq!(backtrace.status(), BacktraceStatus::Captured);

        let value = ErrorValue::with_backtrace(&Inner, backtrace);
        let stack = value.stack().expect("captured backtrace should become the stack");
        assert!(!stack.is_empty());
        assert!(value.to_json_value()["stack"].is_string());
    }

    #[test]
    fn test_disabled_backtrace_leaves_stack_null() {
        let value = ErrorValue::with_backtrace(&Inner, Backtrace::disabled());
        assert_eq!(value.stack(), None);
        assert_eq!(value.to_json_value()["stack"], Value::Null);
    }

    #[test]
    fn test_error_value_stack_key_always_present() {
        let rendered = ErrorValue::new("boom").to_json_value();
        assert_eq!(rendered["message"], "boom");
        assert!(rendered.as_object().unwrap().contains_key("stack"));
        assert_eq!(rendered["stack"], Value::Null);

        let rendered = ErrorValue::new("boom").with_stack("at main").to_json_value();
        assert_eq!(rendered["stack"], "at main");
    }

    #[test]
    fn test_error_value_fields_cannot_shadow_message() {
        let rendered = ErrorValue::new("real")
            .with_field("message", "fake")
            .with_field("code", "E_TIMEOUT")
            .to_json_value();

        assert_eq!(rendered["message"], "real");
        assert_eq!(rendered["code"], "E_TIMEOUT");
    }

    #[test]
    fn test_metadata_serializes_as_object() {
        let meta = Metadata::new()
            .with_field("b", 2)
            .with_field("a", "one")
            .with_field("err", ErrorValue::new("x"));

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            json!({ "a": "one", "b": 2, "err": { "message": "x", "stack": null } })
        );
    }
}
