//! Logging macros for ergonomic log message formatting.
//!
//! Every macro takes the logger, the optional request context, then
//! optionally `err: <&error>` and `fields: <&Fields>` (in that order), then a
//! `format!`-style template with its arguments.
//!
//! # Examples
//!
//! ```
//! use fanout_logger::prelude::*;
//! use fanout_logger::{info, warning};
//!
//! let logger = Logger::builder().build();
//! let ctx = LogContext::new().with_trace_id("req-7");
//!
//! info!(logger, Some(&ctx), "Server listening on port {}", 8080);
//!
//! let fields = Fields::new().with("path", "/health");
//! warning!(logger, None, fields: &fields, "slow response: {}ms", 950);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "reset by peer");
//! warning!(logger, None, err: &err, fields: &fields, "upstream failed");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanout_logger::log;
/// log!(logger, None, LogLevel::Info, "Simple message");
/// log!(logger, None, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $ctx:expr, $level:expr, err: $err:expr, fields: $fields:expr, $($arg:tt)+) => {
        $logger.log(
            $ctx,
            $level,
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::Some($fields),
            ::std::format!($($arg)+),
        )
    };
    ($logger:expr, $ctx:expr, $level:expr, err: $err:expr, $($arg:tt)+) => {
        $logger.log(
            $ctx,
            $level,
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::None,
            ::std::format!($($arg)+),
        )
    };
    ($logger:expr, $ctx:expr, $level:expr, fields: $fields:expr, $($arg:tt)+) => {
        $logger.log(
            $ctx,
            $level,
            ::std::option::Option::None,
            ::std::option::Option::Some($fields),
            ::std::format!($($arg)+),
        )
    };
    ($logger:expr, $ctx:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $ctx,
            $level,
            ::std::option::Option::None,
            ::std::option::Option::None,
            ::std::format!($($arg)+),
        )
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanout_logger::debug;
/// debug!(logger, None, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanout_logger::error;
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such table");
/// error!(logger, None, err: &err, "query failed after {} retries", 3);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then terminate through the logger's
/// [`Terminator`](crate::Terminator).
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// use fanout_logger::fatal;
/// let logger = Logger::builder()
///     .terminator(|message: &str| println!("would exit: {}", message))
///     .build();
/// fatal!(logger, None, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $ctx, $crate::LogLevel::Fatal, $($arg)+)
    };
}
