//! Logging backend: records, levels, hooks, entries and the dispatching logger

pub mod appender;
pub mod entry;
pub mod error;
pub mod field_value;
pub mod hook;
pub mod level_logger;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod timestamp;

pub use appender::Appender;
pub use entry::{Entry, ERROR_KEY};
pub use error::{BoxError, LoggerError, NilCause, Result, WrappedError};
pub use field_value::{fields_from, format_fields, FieldValue, Fields};
pub use hook::{Hook, LevelHooks};
pub use level_logger::LevelLogger;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{ExitHandler, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use timestamp::TimestampFormat;
