//! File logging example
//!
//! Demonstrates an async sink writing JSON lines and pretty lines to two
//! files at once.
//!
//! Run with: cargo run --example file_logging

use logger_port::prelude::*;

fn main() -> Result<()> {
    println!("=== Logger Port - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("logger_port_demo");
    std::fs::create_dir_all(&dir)?;
    let json_path = dir.join("app.json");
    let text_path = dir.join("app.log");

    let sink = RecordSink::builder()
        .min_level(LevelFilter::Debug)
        .appender(FileAppender::new(&json_path)?)
        .appender(FileAppender::new(&text_path)?.with_format(RecordFormat::Pretty { colors: false }))
        .async_mode(1000)
        .build();
    let logger = Logger::new(sink, OutputMode::Structured);

    let worker = logger.child_logger(&metadata! { "component" => "worker" });
    for i in 0..10 {
        worker.info("Job finished", Some(metadata! { "job" => i, "durationMs" => i * 15 }));
    }
    worker.error(
        "Job failed",
        Some(metadata! { "error" => ErrorValue::new("timeout").with_field("code", "E_TIMEOUT") }),
    );

    // Dropping the last handle drains the queue and flushes both files
    drop(worker);
    drop(logger);

    println!("JSON log:   {}", json_path.display());
    println!("Pretty log: {}", text_path.display());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
