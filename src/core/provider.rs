//! Provider trait for log output destinations

use super::{error::Result, fields::Fields, log_context::LogContext, log_level::LogLevel};

/// A destination for log records.
///
/// The logger calls providers concurrently through a shared reference, so
/// implementations synchronize their own state. The dispatcher always asks
/// [`should_log`](Provider::should_log) before calling
/// [`write`](Provider::write).
pub trait Provider: Send + Sync {
    /// Emit one record.
    fn write(
        &self,
        ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        fields: &Fields,
    ) -> Result<()>;

    /// Whether a record of `level` passes this provider's filter. Must be
    /// side-effect free.
    fn should_log(&self, ctx: Option<&LogContext>, level: LogLevel) -> bool;

    /// Release the provider's resources. Called at most once.
    fn close(&self, ctx: Option<&LogContext>) -> Result<()>;

    fn name(&self) -> &str;
}
