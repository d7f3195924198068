//! Two threads sharing one logger and a clone of it
//!
//! The first thread mutates the shared logger, so its records interleave with
//! the main thread's. The second thread works on a clone, whose fields and
//! defaults start as a copy and then evolve on their own.
//!
//! Run with: cargo run --example concurrent_fields

use field_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    let logger = Arc::new(FieldLogger::new());
    logger.add_field("main", 0);
    logger.set_defaults(fields_from([("default_0", "def_main")]));

    let first = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            logger.info("Starting first thread");
            logger.add_field("first", 1);
            logger.info("Log to console from first thread");
        })
    };

    let second = {
        let clone = logger.as_ref().clone();
        thread::spawn(move || {
            clone.info("Starting second thread");
            clone.set_defaults(fields_from([("default_2", "def_second")]));
            clone.add_field("second", 2);
            clone.info("Log to console from second thread");
        })
    };

    logger.info("Log to console from main");
    logger.reset_fields();
    logger.info("Log to console from main after reset");

    for handle in [first, second] {
        if handle.join().is_err() {
            eprintln!("worker thread panicked");
        }
    }

    logger.flush()
}
