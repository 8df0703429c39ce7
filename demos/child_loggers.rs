//! Child logger example
//!
//! Demonstrates bindings accumulating down a tree of children, and code
//! written against `LoggerPort` running with either a real or a no-op logger.
//!
//! Run with: cargo run --example child_loggers

use logger_port::prelude::*;

fn handle_request(logger: &dyn LoggerPort, request_id: &str) {
    let request = logger.child(metadata! { "requestId" => request_id });
    request.info("Request received", None);
    request.debug("Looking up session", Some(metadata! { "cache" => "miss" }));
    request.info("Request processed", Some(metadata! { "status" => 200 }));
}

fn main() -> Result<()> {
    println!("=== Logger Port - Child Loggers Example ===\n");

    let root = Logger::configure(LevelFilter::Debug, OutputMode::Structured, Destination::Stdout)?;

    println!("1. Children of the same parent:");
    let auth = root.child(metadata! { "service" => "auth" });
    let billing = root.child(metadata! { "service" => "billing" });
    auth.info("Child logger message", Some(metadata! { "userId" => 789 }));
    billing.info("Invoice issued", Some(metadata! { "invoice" => "INV-1" }));
    root.info("Parent is unchanged", None);

    println!("\n2. Grandchildren accumulate bindings:");
    handle_request(auth.as_ref(), "req-1");
    handle_request(billing.as_ref(), "req-2");

    println!("\n3. The same code with a no-op logger prints nothing:");
    handle_request(&NoopLogger, "req-3");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
