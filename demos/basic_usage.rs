//! Basic logger usage example
//!
//! Demonstrates both output modes and what metadata looks like in each.
//!
//! Run with: cargo run --example basic_usage

use logger_port::prelude::*;
use logger_port::{info, warn};

fn main() -> Result<()> {
    println!("=== Logger Port - Basic Usage Example ===\n");

    // Structured output: one JSON object per line, fields under "meta"
    println!("1. Structured output:");
    let logger = Logger::configure(LevelFilter::Debug, OutputMode::Structured, Destination::Stdout)?;
    logger.debug("Cache warmed", Some(metadata! { "entries" => 1024 }));
    logger.info("Server started", Some(metadata! { "port" => 8080 }));
    logger.info("No metadata at all", None);

    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "database unreachable");
    logger.error(
        "Query failed",
        Some(Metadata::new().with_error(&err).with_field("query", "SELECT 1")),
    );

    // Human output: pretty single lines, fields flattened
    println!("\n2. Human output:");
    let config = LoggerConfig::new(LevelFilter::Info, true);
    let logger = Logger::from_config(&config)?;
    logger.debug("Debug message (hidden)", None);
    info!(logger, { "feature" => "test", "userId" => 123 }, "Pretty info");
    warn!(logger, "Retry attempt {} of {}", 2, 5);
    logger.error(
        "Pretty error info",
        Some(Metadata::new().with_error(&err).with_field("userId", 456)),
    );

    // Configuration from the environment
    println!("\n3. Configuration from LOG_LEVEL / LOG_PRETTY:");
    let config = LoggerConfig::from_env()?;
    println!("   level={} pretty={}", config.level, config.pretty_print);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
