//! Hook that injects a logger's default fields into every record

use crate::core::{Fields, Hook, LogEntry, LogLevel, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// Writes the current default fields into each record, for every level.
///
/// The hook shares its defaults map with the owning
/// [`FieldLogger`](crate::FieldLogger), so replacing the defaults changes what later records
/// receive without registering another hook. Defaults are written after the
/// record's own fields and win on key collisions.
pub struct DefaultFieldsHook {
    defaults: Arc<RwLock<Fields>>,
}

impl DefaultFieldsHook {
    pub fn new(defaults: Arc<RwLock<Fields>>) -> Self {
        Self { defaults }
    }
}

impl Hook for DefaultFieldsHook {
    fn levels(&self) -> &[LogLevel] {
        &LogLevel::ALL
    }

    fn fire(&self, entry: &mut LogEntry) -> Result<()> {
        let defaults = self.defaults.read();
        entry
            .data
            .extend(defaults.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn name(&self) -> &str {
        "default_fields"
    }
}
