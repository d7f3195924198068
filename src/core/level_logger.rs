//! Severity verbs shared by every logger-like type
//!
//! Implementors provide [`LevelLogger::log`]; the plain, formatted and
//! line-oriented verbs for each level are derived from it.

use super::log_level::LogLevel;
use std::fmt;

/// Join line-oriented arguments with single spaces.
pub fn join_line(parts: &[&dyn fmt::Display]) -> String {
    parts
        .iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

macro_rules! level_verbs {
    ($($level:ident => $plain:ident, $formatted:ident, $line:ident;)+) => {
        $(
            #[doc = concat!("Log a message at `", stringify!($level), "` level.")]
            #[inline]
            fn $plain(&self, message: impl fmt::Display)
            where
                Self: Sized,
            {
                self.log(LogLevel::$level, message.to_string());
            }

            #[doc = concat!("Log pre-formatted arguments at `", stringify!($level), "` level.")]
            #[inline]
            fn $formatted(&self, args: fmt::Arguments<'_>) {
                self.log(LogLevel::$level, args.to_string());
            }

            #[doc = concat!("Log space-separated values at `", stringify!($level), "` level.")]
            #[inline]
            fn $line(&self, parts: &[&dyn fmt::Display]) {
                self.log(LogLevel::$level, join_line(parts));
            }
        )+
    };
}

/// Logging verbs for every severity.
///
/// ```
/// use field_logger::{LevelLogger, LogLevel};
/// use parking_lot::Mutex;
///
/// struct Recorder(Mutex<Vec<(LogLevel, String)>>);
///
/// impl LevelLogger for Recorder {
///     fn log(&self, level: LogLevel, message: String) {
///         self.0.lock().push((level, message));
///     }
/// }
///
/// let recorder = Recorder(Mutex::new(Vec::new()));
/// recorder.info("started");
/// recorder.warnf(format_args!("retry {} of {}", 1, 3));
/// recorder.errorln(&[&"code", &500]);
///
/// let seen = recorder.0.lock();
/// assert_eq!(seen[1], (LogLevel::Warn, "retry 1 of 3".to_string()));
/// assert_eq!(seen[2], (LogLevel::Error, "code 500".to_string()));
/// ```
pub trait LevelLogger {
    fn log(&self, level: LogLevel, message: String);

    level_verbs! {
        Trace => trace, tracef, traceln;
        Debug => debug, debugf, debugln;
        Info => info, infof, infoln;
        Info => print, printf, println;
        Warn => warn, warnf, warnln;
        Warn => warning, warningf, warningln;
        Error => error, errorf, errorln;
        Fatal => fatal, fatalf, fatalln;
        Panic => panic, panicf, panicln;
    }
}
