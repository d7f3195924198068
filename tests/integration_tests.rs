//! Integration tests for the field logger
//!
//! These tests verify:
//! - Fields and defaults reach emitted records
//! - Clones are isolated from their source
//! - Reset and removal semantics
//! - Error wrapping and logging
//! - File and JSON outputs

use field_logger::prelude::*;
use field_logger::{NilCause, ERROR_KEY};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn memory_logger() -> (FieldLogger, MemoryAppender) {
    let memory = MemoryAppender::new();
    let logger = FieldLogger::builder()
        .min_level(LogLevel::Trace)
        .appender(memory.clone())
        .build();
    (logger, memory)
}

#[test]
fn test_clone_scenario_keeps_context_apart() {
    let (root, memory) = memory_logger();
    root.add_field("main", 0);
    root.set_defaults(fields_from([("default_0", "def_main")]));

    let second = root.clone();
    second.set_defaults(fields_from([("default_2", "def_second")]));
    second.add_field("second", 2);

    root.info("x");
    second.info("y");

    let x = memory.find("x").expect("record from root");
    assert_eq!(
        x.data,
        fields_from([
            ("main", FieldValue::Int(0)),
            ("default_0", FieldValue::from("def_main")),
        ])
    );

    // The clone copied "main" at clone time; the root never sees "second".
    let y = memory.find("y").expect("record from clone");
    assert_eq!(y.data.get("main"), Some(&FieldValue::Int(0)));
    assert_eq!(y.data.get("second"), Some(&FieldValue::Int(2)));
    assert_eq!(y.data.get("default_2"), Some(&FieldValue::from("def_second")));
    assert!(!y.data.contains_key("default_0"));
    assert!(!x.data.contains_key("second"));
    assert!(!x.data.contains_key("default_2"));
}

#[test]
fn test_clone_field_isolation_both_ways() {
    let (a, _memory) = memory_logger();
    a.add_field("shared", "before");
    let b = a.clone();

    a.add_field("only_a", 1);
    a.remove_fields_by_key(&["shared"]);
    b.add_field("only_b", 2);

    assert_eq!(a.fields(), fields_from([("only_a", 1)]));
    assert_eq!(
        b.fields(),
        fields_from([("shared", FieldValue::from("before")), ("only_b", FieldValue::Int(2))])
    );
}

#[test]
fn test_defaults_shadow_fields() {
    let (logger, memory) = memory_logger();
    logger.add_field("env", "field-value");
    logger.set_defaults(fields_from([("env", "default-value")]));

    logger.info("shadowed");

    assert_eq!(
        memory.find("shadowed").unwrap().data["env"],
        FieldValue::from("default-value")
    );
    assert_eq!(logger.fields()["env"], FieldValue::from("field-value"));
}

#[test]
fn test_reset_fields_keeps_defaults() {
    let (logger, memory) = memory_logger();
    logger.add_fields(fields_from([("a", 1), ("b", 2)]));
    logger.set_defaults(fields_from([("d", 3)]));

    logger.reset_fields();
    logger.info("after reset");

    assert!(logger.fields().is_empty());
    assert_eq!(memory.find("after reset").unwrap().data, fields_from([("d", 3)]));
}

#[test]
fn test_reset_clears_fields_and_defaults() {
    let (logger, memory) = memory_logger();
    logger.add_field("a", 1);
    logger.set_defaults(fields_from([("d", 3)]));

    logger.reset();
    logger.info("blank");

    assert!(logger.fields().is_empty());
    assert!(logger.defaults().is_empty());
    assert!(memory.find("blank").unwrap().data.is_empty());
}

#[test]
fn test_remove_missing_key_is_noop() {
    let (logger, _memory) = memory_logger();
    logger.add_field("kept", true);

    logger.remove_fields_by_key(&["absent"]);
    logger.remove_fields_by_key(&["absent"]);

    assert_eq!(logger.fields(), fields_from([("kept", true)]));
}

#[test]
fn test_wrap_and_print_with_error() {
    let (logger, memory) = memory_logger();
    let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");

    let wrapped = logger.wrap_and_print_with_error(Some(cause), format_args!("context {}", "X"));

    let text = wrapped.to_string();
    assert!(text.contains("context X"));
    assert!(text.contains("refused"));

    let errors = memory.records_at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "context X");
    assert_eq!(errors[0].data[ERROR_KEY], FieldValue::from(text));
}

#[test]
fn test_wrap_without_error_uses_nil_cause() {
    let (logger, memory) = memory_logger();

    let wrapped =
        logger.wrap_and_print_with_error(None::<std::io::Error>, format_args!("nothing to wrap"));

    assert!(wrapped.is_nil_cause());
    assert_eq!(wrapped.to_string(), format!("nothing to wrap: {}", NilCause));
    assert_eq!(memory.records_at(LogLevel::Error).len(), 1);
}

#[test]
fn test_print_with_error_attaches_error() {
    let (logger, memory) = memory_logger();
    let err = std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded");

    logger.print_with_error(Some(err), format_args!("upload {}", 9));
    logger.print_with_error(Some("plain text cause"), format_args!("retry {}", 1));

    let record = memory.find("upload 9").unwrap();
    assert_eq!(record.level, LogLevel::Error);
    assert_eq!(record.data[ERROR_KEY], FieldValue::from("quota exceeded"));
    assert_eq!(
        memory.find("retry 1").unwrap().data[ERROR_KEY],
        FieldValue::from("plain text cause")
    );
    assert!(logger.fields().is_empty());
}

#[test]
fn test_with_fields_is_per_record() {
    let (logger, memory) = memory_logger();
    logger.add_field("base", 1);

    logger
        .with_fields(&fields_from([("extra", 2)]))
        .info("with extra");
    logger.info("without extra");

    assert!(memory.find("with extra").unwrap().data.contains_key("extra"));
    assert!(!memory.find("without extra").unwrap().data.contains_key("extra"));
    assert!(memory.find("without extra").unwrap().data.contains_key("base"));
}

#[test]
fn test_hook_registered_once_across_many_set_defaults() {
    let (logger, _memory) = memory_logger();

    for round in 0..1000 {
        logger.set_defaults(fields_from([("round", round)]));
    }
    let clone = logger.clone();

    assert_eq!(logger.backend().hook_count(), 1);
    assert_eq!(clone.backend().hook_count(), 1);
    assert_eq!(clone.defaults(), fields_from([("round", 999)]));
}

#[test]
fn test_from_backend_does_not_leak_defaults() {
    let memory = MemoryAppender::new();
    let backend = Logger::builder().appender(memory.clone()).build();
    let facade = FieldLogger::from_backend(&backend);

    facade.set_defaults(fields_from([("facade", true)]));
    backend.info("plain backend");
    facade.info("through facade");

    assert!(memory.find("plain backend").unwrap().data.is_empty());
    assert!(memory.find("through facade").unwrap().data.contains_key("facade"));
}

#[test]
fn test_fatal_uses_exit_handler() {
    let memory = MemoryAppender::new();
    let exits = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let seen = Arc::clone(&exits);
    let logger = FieldLogger::builder()
        .appender(memory.clone())
        .exit_handler(Arc::new(move |code: i32| seen.lock().push(code)))
        .build();
    logger.add_field("stage", "shutdown");

    logger.fatalf(format_args!("cannot continue: {}", "disk"));

    assert_eq!(*exits.lock(), vec![1]);
    let record = memory.find("cannot continue: disk").unwrap();
    assert_eq!(record.level, LogLevel::Fatal);
    assert!(record.data.contains_key("stage"));
}

/// Appender that takes a while per record, so an async queue backs up
#[derive(Clone, Default)]
struct SlowAppender {
    written: Arc<parking_lot::Mutex<Vec<String>>>,
}

impl Appender for SlowAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        std::thread::sleep(Duration::from_millis(2));
        self.written.lock().push(entry.message.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

#[test]
fn test_async_fatal_writes_queued_records_first() {
    let slow = SlowAppender::default();
    let written = Arc::clone(&slow.written);
    let at_exit = Arc::new(parking_lot::Mutex::new(None));
    let seen = Arc::clone(&at_exit);
    let logger = FieldLogger::builder()
        .async_mode(1000)
        .appender(slow)
        .exit_handler(Arc::new(move |code: i32| {
            let written = written.lock();
            *seen.lock() = Some((code, written.len(), written.last().cloned()));
        }))
        .build();

    for i in 0..100 {
        logger.infof(format_args!("queued {}", i));
    }
    logger.fatal("the end");

    let (code, count, last) = at_exit.lock().clone().expect("exit handler ran");
    assert_eq!(code, 1);
    assert_eq!(count, 101);
    assert_eq!(last.as_deref(), Some("the end"));
    assert_eq!(logger.backend().dropped_count(), 0);
}

#[test]
#[should_panic(expected = "unrecoverable")]
fn test_panic_verb_panics() {
    let (logger, _memory) = memory_logger();
    logger.panic("unrecoverable");
}

#[test]
fn test_file_appender_writes_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fields.log");

    let logger = FieldLogger::builder()
        .appender(FileAppender::new(&log_file).expect("Failed to create appender"))
        .build();
    logger.add_field("user", 42);
    logger.set_defaults(fields_from([("app", "billing")]));

    logger.info("line one\nline two");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("line one\\nline two"));
    assert!(lines[0].ends_with("app=billing user=42"));
}

#[test]
fn test_json_appender_async_mode() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("records.json");

    let logger = FieldLogger::builder()
        .async_mode(64)
        .appender(JsonAppender::new(&log_file).expect("Failed to create appender"))
        .build();
    logger.add_field("request_id", "r-7");

    for i in 0..20 {
        logger.infof(format_args!("record {}", i));
    }
    assert!(logger.backend().shutdown(Duration::from_secs(5)));

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json"))
        .collect();
    assert_eq!(records.len(), 20);
    assert!(records.iter().all(|r| r["request_id"] == "r-7"));
}
