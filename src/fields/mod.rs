//! Concurrency-safe field management on top of the backend logger
//!
//! A [`FieldLogger`] carries two kinds of context:
//!
//! - **fields**: explicit key/value pairs owned by the logger instance, mirrored
//!   into its entry so every record it emits carries them
//! - **defaults**: key/value pairs injected into every record at emission time
//!   by a [`DefaultFieldsHook`]; a default overwrites a field with the same key
//!
//! Both are guarded by their own reader/writer lock. When both are held the
//! field lock is always taken first.

pub mod defaults_hook;
pub mod field_logger;
pub mod ops;

pub use defaults_hook::DefaultFieldsHook;
pub use field_logger::{FieldLogger, FieldLoggerBuilder};
pub use ops::{ContextLogger, DefaultsOps, EntryOps, ErrorOps, FieldOps};
