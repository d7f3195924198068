//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// Output destination for records that passed level filtering and hooks.
///
/// Appenders receive the record after every hook has run, so `entry.data`
/// already carries injected default fields.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
