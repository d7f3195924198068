//! Logging macros with `format!`-style arguments.
//!
//! The macros accept any [`LevelLogger`](crate::LevelLogger): a backend
//! [`Logger`](crate::Logger), an [`Entry`](crate::Entry) or a
//! [`FieldLogger`](crate::FieldLogger).
//!
//! # Examples
//!
//! ```
//! use field_logger::prelude::*;
//! use field_logger::info;
//!
//! let logger = FieldLogger::builder().appender(MemoryAppender::new()).build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at the given level.
///
/// ```
/// # use field_logger::prelude::*;
/// # let logger = Logger::builder().appender(MemoryAppender::new()).build();
/// use field_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::LevelLogger as _;
        $logger.log($level, format!($($arg)+))
    }};
}

/// Log a trace-level message.
///
/// ```
/// # use field_logger::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::Trace).appender(MemoryAppender::new()).build();
/// use field_logger::trace;
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then run the logger's exit handler.
///
/// ```
/// # use field_logger::prelude::*;
/// # use std::sync::Arc;
/// # let logger = Logger::builder()
/// #     .appender(MemoryAppender::new())
/// #     .exit_handler(Arc::new(|_: i32| {}))
/// #     .build();
/// use field_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
