//! File appender implementation

use crate::core::{Appender, LogEntry, LoggerError, OutputFormat, Result, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one rendered line per record to a file
pub struct FileAppender {
    path: PathBuf,
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        })
    }

    /// Set the timestamp format for this appender
    ///
    /// ```no_run
    /// use field_logger::appenders::FileAppender;
    /// use field_logger::TimestampFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.output_format.format(entry, &self.timestamp_format);
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{fields_from, LogLevel};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_writes_fields_on_one_line() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");

        let mut appender = FileAppender::new(&log_path)?;
        let entry = LogEntry::new(LogLevel::Info, "line one\nline two".to_string())
            .with_data(fields_from([("user", "alice")]));

        appender.append(&entry)?;
        appender.flush()?;

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("line one\\nline two user=alice"));
        Ok(())
    }

    #[test]
    fn test_open_failure_names_path() {
        let err = FileAppender::new("/nonexistent-dir/for/sure/app.log")
            .err()
            .expect("opening should fail");
        assert!(err.to_string().contains("opening log file"));
    }
}
