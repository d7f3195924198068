//! Field logger: per-instance fields and hook-injected defaults

use super::defaults_hook::DefaultFieldsHook;
use super::ops::{DefaultsOps, EntryOps, ErrorOps, FieldOps};
use crate::appenders::ConsoleAppender;
use crate::core::{
    Appender, Entry, ExitHandler, FieldValue, Fields, LevelLogger, LogLevel, Logger,
    LoggerBuilder, Result,
};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Authoritative fields plus the entry they are mirrored into.
///
/// Both live behind one lock so a reader never sees one updated without the
/// other.
struct FieldState {
    fields: Fields,
    entry: Entry,
}

impl FieldState {
    fn insert(&mut self, key: String, value: FieldValue) {
        self.entry.data_mut().insert(key.clone(), value.clone());
        self.fields.insert(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.fields.remove(key);
        self.entry.data_mut().remove(key);
    }

    fn clear(&mut self) {
        self.fields.clear();
        self.entry.data_mut().clear();
    }
}

/// A structured logger whose fields and defaults can be changed safely from
/// many threads.
///
/// Share one instance with `Arc<FieldLogger>`. [`Clone`] produces an
/// independent logger: it copies the current fields and defaults, gets its
/// own backend logger and hook, and writes through the same appenders.
///
/// ```
/// use field_logger::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let logger = FieldLogger::builder().appender(memory.clone()).build();
///
/// logger.add_field("request_id", "r-1");
/// logger.set_defaults(fields_from([("service", "billing")]));
/// logger.info("charged");
///
/// let record = memory.find("charged").unwrap();
/// assert_eq!(record.data["request_id"], FieldValue::from("r-1"));
/// assert_eq!(record.data["service"], FieldValue::from("billing"));
/// ```
pub struct FieldLogger {
    state: RwLock<FieldState>,
    defaults: Arc<RwLock<Fields>>,
}

impl FieldLogger {
    /// Logger writing text records to the console at `Info` and above
    pub fn new() -> Self {
        Self::with_logger(
            Logger::builder()
                .appender(ConsoleAppender::new())
                .build(),
        )
    }

    #[must_use]
    pub fn builder() -> FieldLoggerBuilder {
        FieldLoggerBuilder::new()
    }

    /// Take ownership of `logger` as this instance's backend.
    ///
    /// Registers the defaults hook on it; any hooks already present keep
    /// firing.
    pub fn with_logger(logger: Logger) -> Self {
        let defaults = Arc::new(RwLock::new(Fields::new()));
        logger.add_hook(Arc::new(DefaultFieldsHook::new(Arc::clone(&defaults))));

        Self {
            state: RwLock::new(FieldState {
                fields: Fields::new(),
                entry: Entry::new(Arc::new(logger)),
            }),
            defaults,
        }
    }

    /// Create a logger writing through `backend`'s appenders with its own
    /// hook registry, so its defaults never reach `backend`'s records.
    pub fn from_backend(backend: &Logger) -> Self {
        Self::with_logger(backend.sibling())
    }

    /// The backend logger owned by this instance
    pub fn backend(&self) -> Arc<Logger> {
        Arc::clone(self.state.read().entry.logger())
    }

    pub fn level(&self) -> LogLevel {
        self.state.read().entry.logger().min_level()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.state.read().entry.logger().set_min_level(level);
    }

    pub fn flush(&self) -> Result<()> {
        self.state.read().entry.logger().flush()
    }
}

impl Default for FieldLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FieldLogger {
    fn clone(&self) -> Self {
        // Both guards held at once: fields, then defaults
        let (backend, fields, defaults) = {
            let state = self.state.read();
            let defaults = self.defaults.read();
            (
                Arc::clone(state.entry.logger()),
                state.fields.clone(),
                defaults.clone(),
            )
        };

        let clone = Self::from_backend(&backend);
        clone.set_defaults(defaults);
        clone.add_fields(fields);
        clone
    }
}

impl fmt::Debug for FieldLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldLogger")
            .field("fields", &self.state.read().fields)
            .field("defaults", &*self.defaults.read())
            .finish()
    }
}

impl FieldOps for FieldLogger {
    fn add_field<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.state.write().insert(key.into(), value.into());
    }

    fn add_fields(&self, fields: Fields) {
        let mut state = self.state.write();
        for (key, value) in fields {
            state.insert(key, value);
        }
    }

    fn remove_fields_by_key(&self, keys: &[&str]) {
        let mut state = self.state.write();
        for key in keys {
            state.remove(key);
        }
    }

    fn remove_fields(&self, fields: &Fields) {
        let mut state = self.state.write();
        for key in fields.keys() {
            state.remove(key);
        }
    }

    fn reset_fields(&self) {
        self.state.write().clear();
    }

    fn fields(&self) -> Fields {
        self.state.read().fields.clone()
    }
}

impl DefaultsOps for FieldLogger {
    fn set_defaults(&self, defaults: Fields) {
        *self.defaults.write() = defaults;
    }

    fn defaults(&self) -> Fields {
        self.defaults.read().clone()
    }
}

impl EntryOps for FieldLogger {
    fn with_field<K, V>(&self, key: K, value: V) -> Entry
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.state.read().entry.with_field(key, value)
    }

    fn with_fields(&self, fields: &Fields) -> Entry {
        self.state.read().entry.with_fields(fields)
    }

    fn with_error(&self, err: &dyn Error) -> Entry {
        self.state.read().entry.with_error(err)
    }
}

impl ErrorOps for FieldLogger {}

impl LevelLogger for FieldLogger {
    fn log(&self, level: LogLevel, message: String) {
        self.state.read().entry.log(level, message);
    }
}

/// Builder for [`FieldLogger`], configuring the backend and the initial
/// fields and defaults.
///
/// ```
/// use field_logger::prelude::*;
///
/// let logger = FieldLogger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(MemoryAppender::new())
///     .field("component", "scheduler")
///     .default_field("host", "node-1")
///     .build();
///
/// assert_eq!(logger.fields().len(), 1);
/// assert_eq!(logger.defaults().len(), 1);
/// ```
pub struct FieldLoggerBuilder {
    backend: LoggerBuilder,
    has_appender: bool,
    fields: Fields,
    defaults: Fields,
}

impl FieldLoggerBuilder {
    pub fn new() -> Self {
        Self {
            backend: LoggerBuilder::new(),
            has_appender: false,
            fields: Fields::new(),
            defaults: Fields::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.backend = self.backend.min_level(level);
        self
    }

    /// Add an appender. Without one, records go to a [`ConsoleAppender`].
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.backend = self.backend.appender(appender);
        self.has_appender = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.backend = self.backend.async_mode(buffer_size);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_handler(mut self, handler: ExitHandler) -> Self {
        self.backend = self.backend.exit_handler(handler);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> FieldLogger {
        let backend = if self.has_appender {
            self.backend
        } else {
            self.backend.appender(ConsoleAppender::new())
        };

        let logger = FieldLogger::with_logger(backend.build());
        logger.set_defaults(self.defaults);
        logger.add_fields(self.fields);
        logger
    }
}

impl Default for FieldLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
