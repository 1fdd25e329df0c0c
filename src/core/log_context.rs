//! Request-scoped context values threaded through every log call

use std::collections::HashMap;
use std::sync::Arc;

/// Well-known key holding the correlation id of the current request.
pub const TRACE_ID_KEY: &str = "trace_id";

/// Immutable string key/value store describing the request a log call
/// belongs to.
///
/// Cloning is cheap; derived contexts share nothing mutable with their
/// parent.
///
/// # Example
///
/// ```
/// use fanout_logger::LogContext;
///
/// let ctx = LogContext::new().with_trace_id("req-42");
/// assert_eq!(ctx.trace_id(), Some("req-42"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    values: Arc<HashMap<String, String>>,
}

impl LogContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context carrying `value` under `key`
    #[must_use]
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = (*self.values).clone();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
        }
    }

    /// Derive a context carrying a correlation id
    #[must_use]
    pub fn with_trace_id(&self, trace_id: impl Into<String>) -> Self {
        self.with_value(TRACE_ID_KEY, trace_id)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.value(TRACE_ID_KEY)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
