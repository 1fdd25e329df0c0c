//! # Fanout Logger
//!
//! A structured logging facade: one [`Logger`] fans every record out to a
//! fixed list of pluggable providers, each with its own level filter.
//!
//! ## Features
//!
//! - **Fan-out**: console, file, JSON and custom providers behind one trait
//! - **Structured fields**: per-call fields merged with request context
//! - **Fault isolation**: a failing or panicking provider never blocks the others
//! - **Thread safe**: concurrent callers share the dispatch path without serializing

pub mod core;
pub mod macros;
pub mod providers;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::providers::ConsoleProvider;
    #[cfg(feature = "file")]
    pub use crate::providers::FileProvider;
    pub use crate::providers::JsonProvider;
    pub use crate::core::{
        DefaultFieldsHandler, FieldValue, Fields, FieldsHandler, LogContext, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, ProcessExit, Provider,
        ProviderConfig, Result, Terminator, TimestampFormat,
    };
}

#[cfg(feature = "console")]
pub use crate::providers::ConsoleProvider;
#[cfg(feature = "file")]
pub use crate::providers::FileProvider;
pub use crate::providers::JsonProvider;
pub use crate::core::{
    DefaultFieldsHandler, FieldValue, Fields, FieldsHandler, LogContext, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, ProcessExit, Provider,
    ProviderConfig, Result, Terminator, TimestampFormat, ERROR_FIELD, FATAL_EXIT_CODE,
    TRACE_ID_FIELD, TRACE_ID_KEY,
};
