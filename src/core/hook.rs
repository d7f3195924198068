//! Hooks run on every emitted record before it reaches the appenders
//!
//! Hooks are registered with a [`Logger`](super::Logger) and can only be added,
//! never removed. A hook that needs replaceable behaviour must carry its own
//! indirection (see [`DefaultFieldsHook`](crate::fields::DefaultFieldsHook)).

use super::{error::Result, log_entry::LogEntry, log_level::LogLevel};
use std::collections::HashMap;
use std::sync::Arc;

pub trait Hook: Send + Sync {
    /// Levels this hook is fired for
    fn levels(&self) -> &[LogLevel];

    /// Inspect or modify the record. An error is reported by the logger and
    /// does not stop the record from being written.
    fn fire(&self, entry: &mut LogEntry) -> Result<()>;

    fn name(&self) -> &str {
        "hook"
    }
}

/// Additive registry of hooks keyed by level
#[derive(Default, Clone)]
pub struct LevelHooks {
    by_level: HashMap<LogLevel, Vec<Arc<dyn Hook>>>,
    registered: usize,
}

impl LevelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        for level in hook.levels() {
            self.by_level
                .entry(*level)
                .or_default()
                .push(Arc::clone(&hook));
        }
        self.registered += 1;
    }

    /// Fire every hook registered for `level`, in registration order.
    ///
    /// Returns the failures; all hooks run regardless.
    pub fn fire(&self, level: LogLevel, entry: &mut LogEntry) -> Vec<(String, super::LoggerError)> {
        let Some(hooks) = self.by_level.get(&level) else {
            return Vec::new();
        };

        hooks
            .iter()
            .filter_map(|hook| {
                hook.fire(entry)
                    .err()
                    .map(|err| (hook.name().to_string(), err))
            })
            .collect()
    }

    /// Number of hooks ever registered
    pub fn len(&self) -> usize {
        self.registered
    }

    pub fn is_empty(&self) -> bool {
        self.registered == 0
    }
}
