//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Boxed error accepted as the cause of a [`WrappedError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A registered hook refused or failed to process a record
    #[error("Hook '{hook}' failed: {message}")]
    HookFailed { hook: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a hook failure error
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HookFailed {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

/// Cause recorded when an absent error is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("<nil>")]
pub struct NilCause;

/// An error annotated with a context message.
///
/// Renders as `"{message}: {cause}"` and exposes the cause through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("{message}: {cause}")]
pub struct WrappedError {
    message: String,
    #[source]
    cause: BoxError,
}

impl WrappedError {
    pub fn new(cause: impl Into<BoxError>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
        }
    }

    /// Wrap an optional cause; `None` is recorded as [`NilCause`].
    pub fn wrap<E>(cause: Option<E>, message: impl Into<String>) -> Self
    where
        E: Into<BoxError>,
    {
        match cause {
            Some(cause) => Self::new(cause, message),
            None => Self::new(NilCause, message),
        }
    }

    /// The context message, without the cause
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the wrapped cause was absent
    pub fn is_nil_cause(&self) -> bool {
        self.cause.is::<NilCause>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::other("stream closed");
        assert!(matches!(err, LoggerError::Other(_)));

        let err = LoggerError::hook("defaults", "lock poisoned");
        assert!(matches!(err, LoggerError::HookFailed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::hook("defaults", "rejected");
        assert_eq!(err.to_string(), "Hook 'defaults' failed: rejected");

        let err = LoggerError::other("stream closed");
        assert_eq!(err.to_string(), "stream closed");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_wrapped_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = WrappedError::new(io_err, "loading config");

        assert_eq!(err.to_string(), "loading config: missing");
        assert_eq!(err.message(), "loading config");
        assert_eq!(err.source().map(|s| s.to_string()), Some("missing".to_string()));
        assert!(!err.is_nil_cause());
    }

    #[test]
    fn test_wrapped_nil_cause() {
        let err = WrappedError::wrap(None::<std::io::Error>, "nothing failed");
        assert!(err.is_nil_cause());
        assert_eq!(err.to_string(), "nothing failed: <nil>");
    }
}
