//! # Field Logger
//!
//! A structured logger decorator whose per-instance context can be mutated
//! safely from many threads at once.
//!
//! ## Features
//!
//! - **Fields**: explicit key/value pairs owned by a logger instance and
//!   attached to every record it emits
//! - **Defaults**: key/value pairs injected into every record by a single
//!   registered hook, replaceable at any time
//! - **Independent clones**: a cloned logger copies the context and gets its
//!   own backend entry, while still writing through the same appenders
//! - **Appenders**: console, file, JSON and in-memory outputs, optionally on a
//!   background worker
//!
//! ## Example
//!
//! ```
//! use field_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let memory = MemoryAppender::new();
//! let logger = Arc::new(FieldLogger::builder().appender(memory.clone()).build());
//!
//! let worker = {
//!     let logger = Arc::clone(&logger);
//!     std::thread::spawn(move || logger.add_field("worker", 1))
//! };
//! worker.join().unwrap();
//!
//! logger.infof(format_args!("{} jobs queued", 3));
//! assert_eq!(memory.records()[0].data["worker"], FieldValue::Int(1));
//! ```

pub mod appenders;
pub mod core;
pub mod fields;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, JsonAppender, MemoryAppender};
    pub use crate::core::{
        fields_from, Appender, Entry, ExitHandler, FieldValue, Fields, Hook, LevelLogger,
        LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, OutputFormat,
        Result, TimestampFormat, WrappedError, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::fields::{
        ContextLogger, DefaultFieldsHook, DefaultsOps, EntryOps, ErrorOps, FieldLogger,
        FieldLoggerBuilder, FieldOps,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, JsonAppender, MemoryAppender};
pub use core::{
    fields_from, Appender, BoxError, Entry, ExitHandler, FieldValue, Fields, Hook, LevelLogger,
    LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, NilCause,
    OutputFormat, Result, TimestampFormat, WrappedError, DEFAULT_SHUTDOWN_TIMEOUT, ERROR_KEY,
};
pub use fields::{
    ContextLogger, DefaultFieldsHook, DefaultsOps, EntryOps, ErrorOps, FieldLogger,
    FieldLoggerBuilder, FieldOps,
};
