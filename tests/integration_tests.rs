//! Integration tests for the logger port
//!
//! These tests verify:
//! - Payload shape per output mode, with and without an error
//! - Child bindings and their independence
//! - Level filtering, including silent
//! - File output in both record formats
//! - Substitutability of the no-op logger

mod common;

use common::{read_records, CaptureSink};
use logger_port::prelude::*;
use serde_json::json;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug)]
struct SampleError;

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pretty error")
    }
}

impl std::error::Error for SampleError {}

fn file_logger(
    dir: &TempDir,
    name: &str,
    level: LevelFilter,
    mode: OutputMode,
) -> (Logger, RecordSink, PathBuf) {
    let path = dir.path().join(name);
    let sink = RecordSink::builder()
        .min_level(level)
        .appender(FileAppender::new(&path).expect("Failed to create appender"))
        .build();
    (Logger::new(sink.clone(), mode), sink, path)
}

#[test]
fn test_human_info_spreads_metadata() {
    let sink = CaptureSink::new();
    let logger = Logger::new(sink.clone(), OutputMode::Human);

    logger.info(
        "Pretty info",
        Some(metadata! { "feature" => "test", "userId" => 123 }),
    );

    let emission = sink.last();
    assert_eq!(emission.level, LogLevel::Info);
    assert_eq!(emission.message, "Pretty info");
    assert_eq!(emission.payload_value(), json!({ "feature": "test", "userId": 123 }));
}

#[test]
fn test_human_error_promotes_error() {
    let sink = CaptureSink::new();
    let logger = Logger::new(sink.clone(), OutputMode::Human);

    let meta = Metadata::new()
        .with_error(&SampleError)
        .with_field("userId", 456);
    logger.error("Pretty error info", Some(meta));

    let payload = sink.last().payload_value();
    assert_eq!(payload["error"]["message"], "Pretty error");
    assert!(payload["error"].as_object().unwrap().contains_key("stack"));
    assert_eq!(payload["userId"], 456);
    assert!(payload.get("meta").is_none());
}

#[test]
fn test_structured_debug_nests_metadata() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, sink, path) = file_logger(&dir, "debug.log", LevelFilter::Debug, OutputMode::Structured);

    logger.debug("Test debug message", Some(metadata! { "userId" => 123 }));
    sink.flush().expect("Failed to flush");

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "debug");
    assert_eq!(records[0]["msg"], "Test debug message");
    assert_eq!(records[0]["meta"], json!({ "userId": 123 }));
    assert!(records[0].get("userId").is_none());
}

#[test]
fn test_structured_info_and_warn() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, sink, path) = file_logger(&dir, "levels.log", LevelFilter::Debug, OutputMode::Structured);

    logger.info("Test info message", Some(metadata! { "userId" => 123 }));
    logger.warn("Test warn message", Some(metadata! { "userId" => 123 }));
    sink.flush().expect("Failed to flush");

    let records = read_records(&path);
    assert_eq!(records[0]["level"], "info");
    assert_eq!(records[1]["level"], "warn");
    for record in &records {
        assert_eq!(record["meta"], json!({ "userId": 123 }));
    }
}

#[test]
fn test_structured_error_keeps_error_beside_meta() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, sink, path) = file_logger(&dir, "error.log", LevelFilter::Debug, OutputMode::Structured);

    let meta = Metadata::new()
        .with_error(&SampleError)
        .with_field("userId", 123);
    logger.error("Test error message", Some(meta));
    sink.flush().expect("Failed to flush");

    let records = read_records(&path);
    let error = records[0]["error"].as_object().expect("error should be an object");
    assert_eq!(error["message"], "Pretty error");
    assert!(error.contains_key("stack"));
    assert_eq!(records[0]["meta"], json!({ "userId": 123 }));
}

#[test]
fn test_structured_error_with_no_other_fields() {
    let sink = CaptureSink::new();
    let logger = Logger::new(sink.clone(), OutputMode::Structured);

    logger.error("bare", Some(Metadata::new().with_error(&SampleError)));

    let payload = sink.last().payload_value();
    assert_eq!(payload["meta"], json!({}));
    assert_eq!(payload["error"]["message"], "Pretty error");
}

#[test]
fn test_absent_metadata_produces_empty_payload() {
    for mode in [OutputMode::Structured, OutputMode::Human] {
        let sink = CaptureSink::new();
        let logger = Logger::new(sink.clone(), mode);

        logger.info("no meta", None);

        assert!(sink.last().payload.is_empty());
    }
}

#[test]
fn test_error_like_object_is_not_promoted() {
    let sink = CaptureSink::new();
    let logger = Logger::new(sink.clone(), OutputMode::Structured);

    let meta = metadata! {
        "error" => json!({ "message": "looks like an error" }),
        "userId" => 1,
    };
    logger.error("not an error", Some(meta));

    let payload = sink.last().payload_value();
    assert_eq!(
        payload,
        json!({ "meta": { "error": { "message": "looks like an error" }, "userId": 1 } })
    );
}

#[test]
fn test_child_logger_binds_fields() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, sink, path) = file_logger(&dir, "child.log", LevelFilter::Debug, OutputMode::Structured);

    let child = logger.child(metadata! { "service" => "auth" });
    child.info("Child logger message", Some(metadata! { "userId" => 789 }));
    sink.flush().expect("Failed to flush");

    let records = read_records(&path);
    assert_eq!(records[0]["service"], "auth");
    assert_eq!(records[0]["meta"], json!({ "userId": 789 }));
    assert_eq!(records[0]["msg"], "Child logger message");
}

#[test]
fn test_sibling_children_are_independent() {
    let sink = CaptureSink::new();
    let logger = Logger::new(sink.clone(), OutputMode::Structured);

    let c1 = logger.child(metadata! { "a" => 1 });
    let c2 = logger.child(metadata! { "b" => 2 });

    c1.info("one", None);
    c2.info("two", None);
    logger.info("root", None);

    let emissions = sink.emissions();
    assert_eq!(emissions[0].bindings, metadata! { "a" => 1 });
    assert_eq!(emissions[1].bindings, metadata! { "b" => 2 });
    assert!(emissions[2].bindings.is_empty());
}

#[test]
fn test_grandchild_accumulates_and_overrides() {
    let sink = CaptureSink::new();
    let logger = Logger::new(sink.clone(), OutputMode::Human);

    let child = logger.child(metadata! { "service" => "auth", "region" => "eu" });
    let grandchild = child.child(metadata! { "service" => "auth-v2" });
    grandchild.warn("deep", None);

    assert_eq!(
        sink.last().bindings,
        metadata! { "region" => "eu", "service" => "auth-v2" }
    );
}

#[test]
fn test_level_filtering_in_sink() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, sink, path) = file_logger(&dir, "filtered.log", LevelFilter::Warn, OutputMode::Structured);

    logger.debug("hidden", None);
    logger.info("hidden", None);
    logger.warn("shown", None);
    logger.error("shown", None);
    sink.flush().expect("Failed to flush");

    let records = read_records(&path);
    let levels: Vec<&str> = records.iter().map(|r| r["level"].as_str().unwrap()).collect();
    assert_eq!(levels, vec!["warn", "error"]);
    assert_eq!(sink.metrics().filtered_count(), 2);
}

#[test]
fn test_silent_writes_nothing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("silent.log");

    let logger = Logger::configure(
        LevelFilter::Silent,
        OutputMode::Structured,
        Destination::File(path.clone()),
    )
    .expect("Failed to configure logger");

    for level in LogLevel::ALL {
        logger.log(level, "never", Some(metadata! { "userId" => 1 }));
    }
    drop(logger);

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    assert!(content.is_empty());
}

#[test]
fn test_human_mode_to_file_is_pretty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("pretty.log");

    let logger = Logger::configure(
        LevelFilter::Debug,
        OutputMode::Human,
        Destination::File(path.clone()),
    )
    .expect("Failed to configure logger");

    logger
        .child(metadata! { "service" => "auth" })
        .info("User login\nFAKE entry", Some(metadata! { "userId" => 123 }));
    drop(logger);

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1, "Log should be a single line");
    assert!(lines[0].starts_with("INFO "));
    assert!(lines[0].contains("User login\\nFAKE entry"));
    assert!(lines[0].ends_with(r#"{"service":"auth","userId":123}"#));
    assert!(!lines[0].contains('\u{1b}'), "file output should not be colored");
}

#[test]
fn test_multiple_appenders_receive_each_record() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("app.json");
    let text_path = dir.path().join("app.log");

    let sink = RecordSink::builder()
        .min_level(LevelFilter::Debug)
        .appender(FileAppender::new(&json_path).expect("Failed to create appender"))
        .appender(
            FileAppender::new(&text_path)
                .expect("Failed to create appender")
                .with_format(RecordFormat::Pretty { colors: false }),
        )
        .build();
    let logger = Logger::new(sink.clone(), OutputMode::Structured);

    logger.info("Request processed", Some(metadata! { "status" => 200 }));
    sink.flush().expect("Failed to flush");

    let records = read_records(&json_path);
    assert_eq!(records[0]["meta"]["status"], 200);

    let text = fs::read_to_string(&text_path).expect("Failed to read log file");
    assert!(text.contains("Request processed"));
    assert!(text.contains(r#"{"meta":{"status":200}}"#));
}

#[test]
fn test_reserved_record_keys_cannot_be_replaced() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, sink, path) = file_logger(&dir, "reserved.log", LevelFilter::Debug, OutputMode::Human);

    logger.info("real", Some(metadata! { "msg" => "forged", "level" => "error" }));
    sink.flush().expect("Failed to flush");

    let records = read_records(&path);
    assert_eq!(records[0]["msg"], "real");
    assert_eq!(records[0]["level"], "info");
}

#[test]
fn test_config_drives_logger() {
    let config = LoggerConfig::from_json(r#"{"level":"debug","prettyPrint":true}"#)
        .expect("Failed to parse config");
    assert_eq!(config.output_mode(), OutputMode::Human);

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("configured.log");
    let logger = Logger::configure(config.level, config.output_mode(), Destination::File(path.clone()))
        .expect("Failed to configure logger");

    logger.debug("Pretty debug", Some(metadata! { "userId" => 123 }));
    drop(logger);

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    assert!(content.starts_with("DEBUG ["));
    assert!(content.contains(r#"{"userId":123}"#));
}

#[test]
fn test_unwritable_destination_is_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("missing").join("app.log");

    let err = Logger::configure(LevelFilter::Info, OutputMode::Structured, Destination::File(path))
        .unwrap_err();
    assert!(matches!(err, LoggerError::IoOperation { .. }));
}

fn run_service(logger: &dyn LoggerPort) -> Box<dyn LoggerPort> {
    let child = logger.child(metadata! { "service" => "worker" });
    child.debug("starting", None);
    child.info("working", Some(metadata! { "step" => 1 }));
    child.warn("slow", None);
    child.error("failed", Some(Metadata::new().with_error(&SampleError)));
    child
}

#[test]
fn test_noop_logger_substitutes_for_any_port() {
    let child = run_service(&NoopLogger);
    child.info("still fine", None);

    let sink = CaptureSink::new();
    let logger = Logger::new(sink.clone(), OutputMode::Structured);
    run_service(&logger);
    assert_eq!(sink.emissions().len(), 4);
}

#[test]
fn test_logger_shared_across_threads() {
    let sink = CaptureSink::new();
    let logger: Arc<dyn LoggerPort> = Arc::new(Logger::new(sink.clone(), OutputMode::Structured));

    let handles: Vec<_> = (0..4)
        .map(|id| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                let child = logger.child(metadata! { "thread" => id });
                for i in 0..10 {
                    child.info(&format!("Thread {} message {}", id, i), None);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let emissions = sink.emissions();
    assert_eq!(emissions.len(), 40);
    for emission in emissions {
        let thread = emission.bindings.get("thread").expect("thread binding missing");
        assert!(emission.message.starts_with(&format!("Thread {} ", thread.to_json_value())));
    }
}

#[test]
fn test_record_time_is_epoch_millis() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, sink, path) = file_logger(&dir, "time.log", LevelFilter::Info, OutputMode::Structured);

    let before = chrono::Utc::now().timestamp_millis();
    logger.info("timed", None);
    let after = chrono::Utc::now().timestamp_millis();
    sink.flush().expect("Failed to flush");

    let records = read_records(&path);
    let time = records[0]["time"].as_i64().expect("time should be an integer");
    assert!(time >= before && time <= after);
    assert!(records[0].get("meta").is_none());
}
