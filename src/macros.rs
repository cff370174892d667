//! Logging macros that capture the call site.
//!
//! Each macro takes a logger, a message template and any number of
//! arguments convertible to [`FieldValue`](crate::FieldValue). The record
//! carries `file!()`, `line!()` and `module_path!()` so templates can use
//! `%(fn)s`, `%(lno)d` and `%(func)s`. Every macro evaluates to the dispatch
//! `Result`.
//!
//! # Examples
//!
//! ```
//! use rust_hierarchical_logger::prelude::*;
//! use rust_hierarchical_logger::{info, warning};
//!
//! let registry = Registry::new();
//! let logger = registry.get_logger("app.server");
//!
//! info!(logger, "Server started").unwrap();
//! warning!(logger, "Listening on port %s as %s", 8080, "svc").unwrap();
//! ```

/// Log with any level tag.
///
/// # Examples
///
/// ```
/// # use rust_hierarchical_logger::prelude::*;
/// # let logger = Registry::new().get_logger("app");
/// use rust_hierarchical_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, "audit", "user %s logged in", 42).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_at(
            ::core::convert::AsRef::<str>::as_ref(&$level),
            $msg,
            vec![$($crate::FieldValue::from($arg)),*],
            $crate::CallSite::new(file!(), line!(), module_path!()),
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_hierarchical_logger::prelude::*;
/// # let logger = Registry::new().get_logger("app");
/// use rust_hierarchical_logger::error;
/// error!(logger, "everything is broken! (%s, %s, %s)", 1, 2, 3).unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
