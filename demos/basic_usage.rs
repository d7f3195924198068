//! Basic field logger usage
//!
//! Demonstrates fields, defaults, per-record entries and error wrapping.
//!
//! Run with: cargo run --example basic_usage

use field_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Field Logger - Basic Usage Example ===\n");

    let logger = FieldLogger::builder()
        .min_level(LogLevel::Trace)
        .appender(ConsoleAppender::new())
        .default_field("service", "demo")
        .exit_handler(Arc::new(|code: i32| println!("(exit {} suppressed)", code)))
        .build();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Fields:");
    logger.add_fields(fields_from([("user", "alice"), ("session", "s-42")]));
    logger.infof(format_args!("{} items in cart", 3));
    logger.remove_fields_by_key(&["session"]);
    logger.infoln(&[&"checkout", &"started"]);

    println!("\n3. Per-record fields:");
    logger.with_field("order_id", 1001).info("Order placed");
    logger
        .with_fields(&fields_from([("retry", 2), ("backoff_ms", 250)]))
        .warn("Payment gateway slow");

    println!("\n4. Errors:");
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "receipt template missing");
    let wrapped = logger.wrap_and_print_with_error(Some(io_err), format_args!("render receipt"));
    println!("returned error: {}", wrapped);
    logger.print_with_error(None::<std::io::Error>, format_args!("nothing went wrong"));

    println!("\n5. Minimum level:");
    logger.set_level(LogLevel::Warn);
    logger.info("This info message will NOT be shown");
    logger.warn("This warning WILL be shown");

    logger.reset();
    logger.error("Context cleared");

    logger.flush()
}
