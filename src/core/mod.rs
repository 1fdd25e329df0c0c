//! Core logger types and traits

pub mod config;
pub mod error;
pub mod fields;
pub mod log_context;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod provider;
pub mod terminator;
pub mod timestamp;

pub use config::{LoggerConfig, ProviderConfig};
pub use error::{LoggerError, Result};
pub use fields::{DefaultFieldsHandler, FieldValue, Fields, FieldsHandler, ERROR_FIELD, TRACE_ID_FIELD};
pub use log_context::{LogContext, TRACE_ID_KEY};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use provider::Provider;
pub use terminator::{ProcessExit, Terminator, FATAL_EXIT_CODE};
pub use timestamp::TimestampFormat;
