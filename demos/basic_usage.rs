//! Basic logger usage example
//!
//! Fans records out to the console and a JSON file with different
//! thresholds, then shuts the providers down.
//!
//! Run with: cargo run --example basic_usage

use fanout_logger::prelude::*;
use fanout_logger::{info, warning};

fn main() -> Result<()> {
    println!("=== Fanout Logger - Basic Usage Example ===\n");

    let json_path = std::env::temp_dir().join("fanout_logger_demo.jsonl");

    let logger = Logger::builder()
        .config(LoggerConfig::new().with_name("demo"))
        .provider(ConsoleProvider::new(ProviderConfig::new(LogLevel::Debug)))
        .provider(JsonProvider::file(&json_path, ProviderConfig::new(LogLevel::Warn))?)
        .build();

    println!("1. Logging at different levels:");
    logger.debug(None, "This is a debug message");
    logger.info(None, "This is an info message");
    logger.warning(None, "This is a warning message");
    logger.error(None, "This is an error message");

    println!("\n2. Structured fields and request context:");
    let ctx = LogContext::new().with_trace_id("req-8f2c");
    let fields = Fields::new().with("user", "bob").with("items", 3);
    logger.info_with_fields(Some(&ctx), &fields, "cart updated");
    info!(logger, Some(&ctx), "checkout took {}ms", 42);

    println!("\n3. Errors become an \"error\" field:");
    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "payment gateway timed out");
    warning!(logger, Some(&ctx), err: &err, fields: &fields, "retrying payment");

    println!("\n4. Closing providers:");
    for (name, result) in logger.provider_names().into_iter().zip(logger.close(None)) {
        match result {
            Ok(()) => println!("   {} closed", name),
            Err(e) => println!("   {} failed to close: {}", name, e),
        }
    }

    println!("\nWarnings and above were also written to {}", json_path.display());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
