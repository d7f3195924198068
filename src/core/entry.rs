//! Entry: a logger handle plus the fields attached to records it emits

use super::{
    field_value::{FieldValue, Fields},
    level_logger::LevelLogger,
    log_level::LogLevel,
    logger::Logger,
};
use std::fmt;
use std::sync::Arc;

/// Key under which [`Entry::with_error`] stores the error message
pub const ERROR_KEY: &str = "error";

/// A logger handle with a data buffer.
///
/// Every record emitted through an entry starts with a copy of its data.
/// `with_*` methods return derived entries and leave the receiver untouched.
#[derive(Clone)]
pub struct Entry {
    logger: Arc<Logger>,
    data: Fields,
}

impl Entry {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            data: Fields::new(),
        }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn data(&self) -> &Fields {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Fields {
        &mut self.data
    }

    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        let mut derived = self.clone();
        derived.data.insert(key.into(), value.into());
        derived
    }

    #[must_use]
    pub fn with_fields(&self, fields: &Fields) -> Entry {
        let mut derived = self.clone();
        derived
            .data
            .extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        derived
    }

    /// Attach the error's message under [`ERROR_KEY`]
    #[must_use]
    pub fn with_error(&self, err: &dyn std::error::Error) -> Entry {
        self.with_field(ERROR_KEY, err.to_string())
    }
}

impl LevelLogger for Entry {
    fn log(&self, level: LogLevel, message: String) {
        self.logger.emit(level, message, self.data.clone());
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("min_level", &self.logger.min_level())
            .field("data", &self.data)
            .finish()
    }
}
