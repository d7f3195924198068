//! Capability traits implemented by [`FieldLogger`](super::FieldLogger)
//!
//! Code that only needs to emit records should depend on
//! [`LevelLogger`]; code that manages context depends on the narrower traits
//! here, or on [`ContextLogger`] for the full set.

use crate::core::{
    BoxError, Entry, FieldValue, Fields, LevelLogger, NilCause, WrappedError,
};
use std::error::Error;
use std::fmt;

/// Explicit per-instance fields
pub trait FieldOps {
    /// Set one field, overwriting any previous value for `key`
    fn add_field<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>;

    /// Merge every entry of `fields` in one atomic step
    fn add_fields(&self, fields: Fields);

    /// Remove fields by key; absent keys are ignored
    fn remove_fields_by_key(&self, keys: &[&str]);

    /// Remove the fields whose keys appear in `fields`; values are ignored
    fn remove_fields(&self, fields: &Fields);

    fn reset_fields(&self);

    /// Point-in-time copy of the current fields
    fn fields(&self) -> Fields;
}

/// Fields injected into every emitted record
pub trait DefaultsOps {
    /// Replace the defaults wholesale
    fn set_defaults(&self, defaults: Fields);

    /// Point-in-time copy of the current defaults
    fn defaults(&self) -> Fields;
}

/// Derive entries carrying extra fields for a single record
pub trait EntryOps {
    fn with_field<K, V>(&self, key: K, value: V) -> Entry
    where
        K: Into<String>,
        V: Into<FieldValue>;

    fn with_fields(&self, fields: &Fields) -> Entry;

    fn with_error(&self, err: &dyn Error) -> Entry;
}

/// Log an error together with a context message.
///
/// Both helpers take the error the same way: any owned error (or string)
/// convertible into [`BoxError`], with `None` standing for an absent error.
pub trait ErrorOps: EntryOps {
    /// Wrap `err` with the formatted message, log it at error level under
    /// the `error` key, and hand the wrapped error back.
    ///
    /// A `None` error is wrapped as [`NilCause`].
    fn wrap_and_print_with_error<E>(&self, err: Option<E>, args: fmt::Arguments<'_>) -> WrappedError
    where
        E: Into<BoxError>,
    {
        let wrapped = WrappedError::wrap(err, args.to_string());
        self.with_error(&wrapped).error(wrapped.message());
        wrapped
    }

    /// Log `err` at error level with the formatted message.
    ///
    /// A `None` error is logged as [`NilCause`].
    fn print_with_error<E>(&self, err: Option<E>, args: fmt::Arguments<'_>)
    where
        E: Into<BoxError>,
    {
        let cause: BoxError = match err {
            Some(err) => err.into(),
            None => Box::new(NilCause),
        };
        self.with_error(&*cause).error(args.to_string());
    }
}

/// Everything a field logger can do
pub trait ContextLogger: LevelLogger + FieldOps + DefaultsOps + ErrorOps + Clone {
    /// Clear the fields and the defaults
    fn reset(&self) {
        self.reset_fields();
        self.set_defaults(Fields::new());
    }
}

impl<T> ContextLogger for T where T: LevelLogger + FieldOps + DefaultsOps + ErrorOps + Clone {}
