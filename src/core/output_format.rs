//! Output format configuration for log entries
//!
//! Provides different output formats for log entries:
//! - Text: Human-readable format (default)
//! - Json: Machine-readable JSON format
//! - Logfmt: Key-value format compatible with log aggregation tools
//!
//! Record fields are rendered in key order so output is stable regardless of
//! insertion order.

use super::field_value::{escape_control, format_fields, FieldValue, Fields};
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use std::collections::HashSet;

/// Keys written by the JSON and logfmt renderers themselves. A record field
/// with one of these names is emitted as `fields.<name>` instead, with the
/// prefix repeated until the key is unused.
const RESERVED_KEYS: [&str; 4] = ["timestamp", "level", "message", "thread"];

/// Output format for log entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] main - Request processed user=42`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"level":"INFO","message":"Request processed","timestamp":"...","user":42}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=INFO message="Request processed" user=42`
    Logfmt,
}

/// Record fields under the keys they are rendered with, sorted by key.
///
/// Every output key is distinct, so no field value is lost.
fn output_fields(data: &Fields) -> Vec<(String, &FieldValue)> {
    let is_reserved = |key: &str| RESERVED_KEYS.contains(&key);

    let mut taken: HashSet<String> = RESERVED_KEYS.iter().map(|k| k.to_string()).collect();
    taken.extend(data.keys().filter(|k| !is_reserved(k.as_str())).cloned());

    let mut pairs: Vec<(String, &FieldValue)> = Vec::with_capacity(data.len());
    for (key, value) in data {
        if !is_reserved(key.as_str()) {
            pairs.push((key.clone(), value));
        }
    }

    let mut reserved: Vec<_> = data.iter().filter(|(k, _)| is_reserved(k.as_str())).collect();
    reserved.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in reserved {
        let mut renamed = format!("fields.{}", key);
        while taken.contains(&renamed) {
            renamed = format!("fields.{}", renamed);
        }
        taken.insert(renamed.clone());
        pairs.push((renamed, value));
    }

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

impl OutputFormat {
    /// Format a log entry according to this output format
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => self.format_text(entry, timestamp_format),
            OutputFormat::Json => self.format_json(entry, timestamp_format),
            OutputFormat::Logfmt => self.format_logfmt(entry, timestamp_format),
        }
    }

    fn format_text(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let base = format!(
            "[{}] [{:5}] {} - {}",
            timestamp_format.format(&entry.timestamp),
            entry.level.to_str(),
            entry.thread_label(),
            entry.message
        );

        if entry.data.is_empty() {
            base
        } else {
            format!("{} {}", base, format_fields(&entry.data))
        }
    }

    fn format_json(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "timestamp".to_string(),
            self.format_timestamp_json(entry, timestamp_format),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );
        json_obj.insert(
            "thread".to_string(),
            serde_json::Value::String(entry.thread_label().to_string()),
        );

        for (key, value) in output_fields(&entry.data) {
            json_obj.insert(key, value.to_json_value());
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }

    fn format_timestamp_json(
        &self,
        entry: &LogEntry,
        timestamp_format: &TimestampFormat,
    ) -> serde_json::Value {
        match timestamp_format {
            TimestampFormat::Unix => serde_json::Value::Number(entry.timestamp.timestamp().into()),
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(entry.timestamp.timestamp_millis().into())
            }
            TimestampFormat::UnixMicros => {
                serde_json::Value::Number(entry.timestamp.timestamp_micros().into())
            }
            _ => serde_json::Value::String(timestamp_format.format(&entry.timestamp)),
        }
    }

    fn format_logfmt(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut parts = vec![
            format!(
                "timestamp={}",
                self.escape_logfmt_value(&timestamp_format.format(&entry.timestamp))
            ),
            format!("level={}", entry.level.to_str()),
            // Message is always quoted
            format!("message={}", self.quote_logfmt_value(&entry.message)),
            format!("thread={}", self.escape_logfmt_value(entry.thread_label())),
        ];

        for (key, value) in output_fields(&entry.data) {
            let formatted_value = match value {
                FieldValue::String(s) => self.quote_logfmt_value(s),
                other => other.to_string(),
            };
            parts.push(format!("{}={}", self.escape_logfmt_key(&key), formatted_value));
        }

        parts.join(" ")
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
            .collect()
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.contains(' ') || value.contains('"') || value.contains('=') {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_logfmt_value(&self, value: &str) -> String {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escape_control(&escaped))
    }
}
