//! In-memory appender that keeps every record it receives

use crate::core::{Appender, LogEntry, LogLevel, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Captures records in memory.
///
/// Clones share the same buffer, so a test can hand one clone to a logger and
/// inspect the records through another.
///
/// ```
/// use field_logger::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let logger = Logger::builder().appender(memory.clone()).build();
///
/// logger.info("captured");
/// assert_eq!(memory.records()[0].message, "captured");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    records: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records captured so far
    pub fn records(&self) -> Vec<LogEntry> {
        self.records.lock().clone()
    }

    /// Records captured at `level`
    pub fn records_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.records
            .lock()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    /// The record with the given message, if captured
    pub fn find(&self, message: &str) -> Option<LogEntry> {
        self.records
            .lock()
            .iter()
            .find(|entry| entry.message == message)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.records.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
