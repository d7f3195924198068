//! Backend logger: level filtering, hooks, and dispatch to appenders

use super::{
    appender::Appender,
    error::Result,
    field_value::Fields,
    hook::{Hook, LevelHooks},
    level_logger::LevelLogger,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the output pipeline is dropped without explicit
/// shutdown. For custom timeout control, use [`Logger::shutdown`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Called with the process exit code after a fatal record has been written
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

type SharedAppenders = Arc<RwLock<Vec<Box<dyn Appender>>>>;

/// Items carried by the async queue
enum Message {
    Record(LogEntry),
    /// Acknowledged once every message queued ahead of it is written and flushed
    Barrier(Sender<()>),
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Output pipeline shared by a logger and all of its siblings.
///
/// Owns the appenders, the metrics and, in async mode, the worker thread.
/// The worker is stopped when the last logger referencing the pipeline is
/// dropped.
struct Dispatcher {
    appenders: SharedAppenders,
    sender: RwLock<Option<Sender<Message>>>,
    async_handle: Mutex<Option<thread::JoinHandle<()>>>,
    metrics: Arc<LoggerMetrics>,
}

impl Dispatcher {
    fn sync() -> Self {
        Self {
            appenders: Arc::new(RwLock::new(Vec::new())),
            sender: RwLock::new(None),
            async_handle: Mutex::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    fn with_async(buffer_size: usize) -> Self {
        let (sender, receiver) = bounded(buffer_size);
        let appenders: SharedAppenders = Arc::new(RwLock::new(Vec::new()));
        let metrics = Arc::new(LoggerMetrics::new());

        let worker_appenders = Arc::clone(&appenders);
        let worker_metrics = Arc::clone(&metrics);
        let handle =
            thread::spawn(move || Self::run_worker(receiver, &worker_appenders, &worker_metrics));

        Self {
            appenders,
            sender: RwLock::new(Some(sender)),
            async_handle: Mutex::new(Some(handle)),
            metrics,
        }
    }

    /// Drain the queue in batches until every sender is gone
    fn run_worker(
        receiver: Receiver<Message>,
        appenders: &SharedAppenders,
        metrics: &LoggerMetrics,
    ) {
        const BATCH_SIZE: usize = 50;

        let mut batch = Vec::with_capacity(BATCH_SIZE);

        while let Ok(message) = receiver.recv() {
            batch.push(message);
            while batch.len() < BATCH_SIZE {
                match receiver.try_recv() {
                    Ok(message) => batch.push(message),
                    Err(_) => break,
                }
            }

            let mut guard = appenders.write();
            for message in batch.drain(..) {
                match message {
                    Message::Record(entry) => {
                        Self::write_entry(&mut guard, &entry, metrics);
                    }
                    Message::Barrier(ack) => {
                        Self::flush_isolated(&mut guard);
                        // The waiter may have timed out and gone
                        let _ = ack.send(());
                    }
                }
            }
            Self::flush_isolated(&mut guard);
        }
    }

    /// Write one record to every appender with per-appender panic isolation.
    ///
    /// Returns `true` if any appender failed.
    fn write_entry(
        appenders: &mut [Box<dyn Appender>],
        entry: &LogEntry,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }

        has_error
    }

    fn flush_isolated(appenders: &mut [Box<dyn Appender>]) {
        for (idx, appender) in appenders.iter_mut().enumerate() {
            let flush_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.flush()
            }));

            match flush_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} flush failed: {}", idx, e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked during flush: {}",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }

    fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Queue the record in async mode, otherwise write it on the caller's thread.
    ///
    /// A full queue blocks the caller until the worker catches up.
    fn dispatch(&self, entry: LogEntry) {
        if let Some(sender) = self.sender.read().as_ref() {
            match sender.try_send(Message::Record(entry)) {
                Ok(()) => {}
                Err(TrySendError::Full(message)) => {
                    self.metrics.record_queue_full();
                    self.metrics.record_block();
                    if sender.send(message).is_err() {
                        self.metrics.record_dropped();
                    }
                }
                Err(TrySendError::Disconnected(_)) => {
                    self.metrics.record_dropped();
                }
            }
            return;
        }

        let mut appenders = self.appenders.write();
        Self::write_entry(&mut appenders, &entry, &self.metrics);
    }

    /// Wait until every record queued before this call has been written and
    /// flushed by the worker.
    ///
    /// Returns `false` if the worker did not catch up within `timeout`. A
    /// synchronous or shut down pipeline has nothing to drain.
    fn drain(&self, timeout: Duration) -> bool {
        let Some(sender) = self.sender.read().clone() else {
            return true;
        };

        let deadline = Instant::now() + timeout;
        let (ack, acked) = bounded(1);
        if sender.send_deadline(Message::Barrier(ack), deadline).is_err() {
            return false;
        }
        acked.recv_deadline(deadline).is_ok()
    }

    /// Drain the async queue, then write a fatal or panic record (if its
    /// level is enabled) synchronously and flush.
    ///
    /// Everything logged before the terminal record is written before it.
    fn write_terminal(&self, entry: Option<&LogEntry>) {
        if !self.drain(DEFAULT_SHUTDOWN_TIMEOUT) {
            eprintln!(
                "[LOGGER WARNING] Async queue not drained within {:?} before a terminal record. \
                 Some logs may be lost.",
                DEFAULT_SHUTDOWN_TIMEOUT
            );
        }

        let Some(entry) = entry else {
            return;
        };
        if self.sender.read().is_some() {
            self.metrics.record_terminal_write();
        }

        let mut appenders = self.appenders.write();
        Self::write_entry(&mut appenders, entry, &self.metrics);
        Self::flush_isolated(&mut appenders);
    }

    fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    fn shutdown(&self, timeout: Duration) -> bool {
        // Closing the channel lets the worker drain and exit
        drop(self.sender.write().take());

        if let Some(handle) = self.async_handle.lock().take() {
            let start = Instant::now();

            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Async worker thread panicked during shutdown: {:?}",
                            e
                        );
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Async worker thread did not finish within {:?} timeout. \
                         Some logs may be lost.",
                        timeout
                    );
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        true
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Structured logging backend.
///
/// A `Logger` filters records by level, runs its registered hooks on each
/// record, and hands the record to its output pipeline. Hooks can only be
/// added. [`Logger::sibling`] creates a logger with its own level and hook
/// registry that writes through the same pipeline.
pub struct Logger {
    min_level: RwLock<LogLevel>,
    hooks: RwLock<LevelHooks>,
    exit_handler: ExitHandler,
    dispatcher: Arc<Dispatcher>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Dispatcher::sync())
    }

    /// Create a logger whose appenders run on a background worker
    #[must_use]
    pub fn with_async(buffer_size: usize) -> Self {
        Self::with_dispatcher(Dispatcher::with_async(buffer_size))
    }

    fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            min_level: RwLock::new(LogLevel::Info),
            hooks: RwLock::new(LevelHooks::new()),
            exit_handler: Arc::new(|code: i32| std::process::exit(code)),
            dispatcher: Arc::new(dispatcher),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Create a logger sharing this logger's output pipeline and exit handler.
    ///
    /// The sibling starts with this logger's current minimum level and an
    /// empty hook registry; hooks added to either logger never fire for the
    /// other.
    #[must_use]
    pub fn sibling(&self) -> Self {
        Self {
            min_level: RwLock::new(self.min_level()),
            hooks: RwLock::new(LevelHooks::new()),
            exit_handler: Arc::clone(&self.exit_handler),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }

    /// Whether `other` writes through the same output pipeline
    pub fn shares_output_with(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.dispatcher, &other.dispatcher)
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.dispatcher.add_appender(appender);
    }

    /// Register a hook. Hooks cannot be removed once added.
    pub fn add_hook(&self, hook: Arc<dyn Hook>) {
        self.hooks.write().add(hook);
    }

    /// Number of hooks registered on this logger
    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    #[inline]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    /// Emit a record carrying `data`.
    ///
    /// Hooks run on the caller's thread before the record is dispatched. A
    /// fatal record runs the exit handler with code 1 and a panic record
    /// panics with the message, whether or not the level is enabled.
    pub fn emit(&self, level: LogLevel, message: String, data: Fields) {
        let enabled = self.is_level_enabled(level);
        if !enabled && !level.is_terminal() {
            return;
        }

        let mut entry = LogEntry::new(level, message).with_data(data);
        if enabled {
            self.fire_hooks(&mut entry);
        }

        match level {
            LogLevel::Fatal => {
                self.dispatcher.write_terminal(enabled.then_some(&entry));
                (self.exit_handler)(1);
            }
            LogLevel::Panic => {
                self.dispatcher.write_terminal(enabled.then_some(&entry));
                panic!("{}", entry.message);
            }
            _ => self.dispatcher.dispatch(entry),
        }
    }

    fn fire_hooks(&self, entry: &mut LogEntry) {
        let failures = self.hooks.read().fire(entry.level, entry);
        for (hook, err) in failures {
            self.dispatcher.metrics.record_hook_failure();
            eprintln!("[LOGGER ERROR] Failed to fire hook '{}': {}", hook, err);
        }
    }

    /// Get the number of dropped logs
    pub fn dropped_count(&self) -> u64 {
        self.dispatcher.metrics.dropped_count()
    }

    /// Metrics of the output pipeline, shared with sibling loggers
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.dispatcher.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.dispatcher.flush()
    }

    /// Close the async queue, wait for pending records, and flush.
    ///
    /// Affects every sibling sharing the pipeline; records emitted afterwards
    /// are written synchronously. Returns `false` if the worker did not finish
    /// within `timeout` or the final flush failed.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        self.dispatcher.shutdown(timeout)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelLogger for Logger {
    fn log(&self, level: LogLevel, message: String) {
        self.emit(level, message, Fields::new());
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use field_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(MemoryAppender::new())
///     .async_mode(1000)
///     .exit_handler(Arc::new(|code: i32| eprintln!("would exit with {}", code)))
///     .build();
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    hooks: Vec<Arc<dyn Hook>>,
    async_buffer: Option<usize>,
    exit_handler: Option<ExitHandler>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            hooks: Vec::new(),
            async_buffer: None,
            exit_handler: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Enable async mode with specified buffer size
    ///
    /// If not called, the logger will use synchronous mode.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    /// Replace the default exit handler (`std::process::exit`) run after a
    /// fatal record.
    #[must_use = "builder methods return a new value"]
    pub fn exit_handler(mut self, handler: ExitHandler) -> Self {
        self.exit_handler = Some(handler);
        self
    }

    pub fn build(self) -> Logger {
        let mut logger = match self.async_buffer {
            Some(size) => Logger::with_async(size),
            None => Logger::new(),
        };

        if let Some(handler) = self.exit_handler {
            logger.exit_handler = handler;
        }
        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        for hook in self.hooks {
            logger.add_hook(hook);
        }

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
