//! Main logger implementation

use super::{
    config::LoggerConfig,
    error::Result,
    fields::{DefaultFieldsHandler, Fields, FieldsHandler, ERROR_FIELD},
    log_context::LogContext,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    provider::Provider,
    terminator::{report_stderr, ProcessExit, Terminator},
};
use parking_lot::RwLock;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

/// Outcome of handing one record to one provider
enum Delivery {
    Filtered,
    Written,
    Failed,
    Panicked,
}

/// Fans log calls out to a fixed, ordered list of providers.
///
/// Every public logging method funnels into one dispatch path: context
/// fields are folded in, then each provider is asked `should_log` and, if it
/// accepts, receives the record. Provider errors and panics are contained
/// per provider and never reach the caller; the remaining providers still
/// receive the record.
///
/// `Fatal` records terminate the process through the configured
/// [`Terminator`] once every provider has been visited.
///
/// # Example
///
/// ```
/// use fanout_logger::prelude::*;
///
/// let logger = Logger::new_default(
///     ProviderConfig::new(LogLevel::Debug),
///     DefaultFieldsHandler::new(),
/// );
///
/// let ctx = LogContext::new().with_trace_id("req-1");
/// logger.info_with_fields(
///     Some(&ctx),
///     &Fields::new().with("user", "bob"),
///     format!("user {} signed in", 42),
/// );
/// ```
pub struct Logger {
    providers: RwLock<Vec<Box<dyn Provider>>>,
    config: LoggerConfig,
    fields_handler: Box<dyn FieldsHandler>,
    terminator: Box<dyn Terminator>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger writing to a single console provider configured by `config`
    #[cfg(feature = "console")]
    #[must_use]
    pub fn new_default(
        config: super::config::ProviderConfig,
        fields_handler: impl FieldsHandler + 'static,
    ) -> Self {
        let base = config.base.clone();
        let console = crate::providers::ConsoleProvider::new(config);
        Self::new(base, fields_handler, vec![Box::new(console)])
    }

    /// Logger dispatching to `providers` in the given order
    #[must_use]
    pub fn new(
        config: LoggerConfig,
        fields_handler: impl FieldsHandler + 'static,
        providers: Vec<Box<dyn Provider>>,
    ) -> Self {
        Self::from_parts(
            config,
            Box::new(fields_handler),
            providers,
            Box::new(ProcessExit),
        )
    }

    fn from_parts(
        config: LoggerConfig,
        fields_handler: Box<dyn FieldsHandler>,
        providers: Vec<Box<dyn Provider>>,
        terminator: Box<dyn Terminator>,
    ) -> Self {
        Self {
            providers: RwLock::new(providers),
            config,
            fields_handler,
            terminator,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use fanout_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .config(LoggerConfig::new().with_name("api"))
    ///     .provider(ConsoleProvider::new(ProviderConfig::new(LogLevel::Warn)))
    ///     .build();
    /// assert_eq!(logger.provider_count(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Dispatch counters for this logger
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn provider_count(&self) -> usize {
        self.providers.read().len()
    }

    /// Provider names in dispatch order
    pub fn provider_names(&self) -> Vec<String> {
        self.providers
            .read()
            .iter()
            .map(|provider| provider.name().to_string())
            .collect()
    }

    /// Canonical logging call behind every convenience method.
    ///
    /// With an error, `{"error": err.to_string()}` is merged over `fields`.
    /// A `Fatal` record terminates the process after dispatch, even when
    /// dispatch itself panicked.
    pub fn log(
        &self,
        ctx: Option<&LogContext>,
        level: LogLevel,
        err: Option<&dyn Error>,
        fields: Option<&Fields>,
        message: impl Into<String>,
    ) {
        let message = message.into();

        if level < LogLevel::Fatal {
            self.dispatch(ctx, level, &message, err, fields);
            return;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.dispatch(ctx, level, &message, err, fields)
        }));
        if outcome.is_err() {
            report_stderr("ERROR", "Dispatch of fatal record panicked; terminating anyway");
        }

        let reason = match err {
            Some(err) => format!("{}: {}", message, err),
            None => message,
        };
        self.terminator.terminate(&reason);
    }

    fn dispatch(
        &self,
        ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        err: Option<&dyn Error>,
        fields: Option<&Fields>,
    ) {
        let empty = Fields::new();
        let fields = fields.unwrap_or(&empty);

        match err {
            Some(err) => {
                let error_fields = Fields::new().with(ERROR_FIELD, err.to_string());
                let merged = self.fields_handler.merge(fields, &error_fields);
                self.write_log(ctx, level, message, &merged);
            }
            None => self.write_log(ctx, level, message, fields),
        }
    }

    fn write_log(&self, ctx: Option<&LogContext>, level: LogLevel, message: &str, fields: &Fields) {
        let providers = self.providers.read();
        let all_fields = self.fields_handler.extract(ctx, fields);
        self.metrics.record_dispatched();

        for provider in providers.iter() {
            match Self::deliver(provider.as_ref(), ctx, level, message, &all_fields) {
                Delivery::Filtered => {
                    self.metrics.record_filtered();
                }
                Delivery::Written => {
                    self.metrics.record_write();
                }
                Delivery::Failed => {
                    self.metrics.record_write();
                    self.metrics.record_write_failure();
                }
                Delivery::Panicked => {
                    self.metrics.record_write();
                    self.metrics.record_write_panic();
                }
            }
        }
    }

    /// Filter and write with panic isolation, so one provider cannot stop
    /// the fan-out to the ones after it
    fn deliver(
        provider: &dyn Provider,
        ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        fields: &Fields,
    ) -> Delivery {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            if !provider.should_log(ctx, level) {
                return None;
            }
            Some(provider.write(ctx, level, message, fields))
        }));

        match outcome {
            Ok(None) => Delivery::Filtered,
            Ok(Some(Ok(()))) => Delivery::Written,
            Ok(Some(Err(_))) => Delivery::Failed,
            Err(_) => Delivery::Panicked,
        }
    }

    /// Close every provider once, in dispatch order.
    ///
    /// The provider list is emptied under the write lock, so later log calls
    /// reach no provider and a second `close` returns no results. Each
    /// provider's outcome is reported separately, in order.
    pub fn close(&self, ctx: Option<&LogContext>) -> Vec<Result<()>> {
        let providers = std::mem::take(&mut *self.providers.write());
        providers.iter().map(|provider| provider.close(ctx)).collect()
    }

    #[inline]
    pub fn debug(&self, ctx: Option<&LogContext>, message: impl Into<String>) {
        self.log(ctx, LogLevel::Debug, None, None, message);
    }

    #[inline]
    pub fn info(&self, ctx: Option<&LogContext>, message: impl Into<String>) {
        self.log(ctx, LogLevel::Info, None, None, message);
    }

    #[inline]
    pub fn warning(&self, ctx: Option<&LogContext>, message: impl Into<String>) {
        self.log(ctx, LogLevel::Warn, None, None, message);
    }

    #[inline]
    pub fn error(&self, ctx: Option<&LogContext>, message: impl Into<String>) {
        self.log(ctx, LogLevel::Error, None, None, message);
    }

    /// Log at `Fatal`, then terminate
    #[inline]
    pub fn fatal(&self, ctx: Option<&LogContext>, message: impl Into<String>) {
        self.log(ctx, LogLevel::Fatal, None, None, message);
    }

    #[inline]
    pub fn debug_err(&self, ctx: Option<&LogContext>, err: &dyn Error, message: impl Into<String>) {
        self.log(ctx, LogLevel::Debug, Some(err), None, message);
    }

    #[inline]
    pub fn info_err(&self, ctx: Option<&LogContext>, err: &dyn Error, message: impl Into<String>) {
        self.log(ctx, LogLevel::Info, Some(err), None, message);
    }

    #[inline]
    pub fn warning_err(&self, ctx: Option<&LogContext>, err: &dyn Error, message: impl Into<String>) {
        self.log(ctx, LogLevel::Warn, Some(err), None, message);
    }

    #[inline]
    pub fn error_err(&self, ctx: Option<&LogContext>, err: &dyn Error, message: impl Into<String>) {
        self.log(ctx, LogLevel::Error, Some(err), None, message);
    }

    /// Log at `Fatal` with an error, then terminate
    #[inline]
    pub fn fatal_err(&self, ctx: Option<&LogContext>, err: &dyn Error, message: impl Into<String>) {
        self.log(ctx, LogLevel::Fatal, Some(err), None, message);
    }

    #[inline]
    pub fn debug_with_fields(&self, ctx: Option<&LogContext>, fields: &Fields, message: impl Into<String>) {
        self.log(ctx, LogLevel::Debug, None, Some(fields), message);
    }

    #[inline]
    pub fn info_with_fields(&self, ctx: Option<&LogContext>, fields: &Fields, message: impl Into<String>) {
        self.log(ctx, LogLevel::Info, None, Some(fields), message);
    }

    #[inline]
    pub fn warning_with_fields(&self, ctx: Option<&LogContext>, fields: &Fields, message: impl Into<String>) {
        self.log(ctx, LogLevel::Warn, None, Some(fields), message);
    }

    #[inline]
    pub fn error_with_fields(&self, ctx: Option<&LogContext>, fields: &Fields, message: impl Into<String>) {
        self.log(ctx, LogLevel::Error, None, Some(fields), message);
    }

    /// Log at `Fatal` with fields, then terminate
    #[inline]
    pub fn fatal_with_fields(&self, ctx: Option<&LogContext>, fields: &Fields, message: impl Into<String>) {
        self.log(ctx, LogLevel::Fatal, None, Some(fields), message);
    }

    #[inline]
    pub fn debug_err_with_fields(
        &self,
        ctx: Option<&LogContext>,
        err: &dyn Error,
        fields: &Fields,
        message: impl Into<String>,
    ) {
        self.log(ctx, LogLevel::Debug, Some(err), Some(fields), message);
    }

    #[inline]
    pub fn info_err_with_fields(
        &self,
        ctx: Option<&LogContext>,
        err: &dyn Error,
        fields: &Fields,
        message: impl Into<String>,
    ) {
        self.log(ctx, LogLevel::Info, Some(err), Some(fields), message);
    }

    #[inline]
    pub fn warning_err_with_fields(
        &self,
        ctx: Option<&LogContext>,
        err: &dyn Error,
        fields: &Fields,
        message: impl Into<String>,
    ) {
        self.log(ctx, LogLevel::Warn, Some(err), Some(fields), message);
    }

    #[inline]
    pub fn error_err_with_fields(
        &self,
        ctx: Option<&LogContext>,
        err: &dyn Error,
        fields: &Fields,
        message: impl Into<String>,
    ) {
        self.log(ctx, LogLevel::Error, Some(err), Some(fields), message);
    }

    /// Log at `Fatal` with an error and fields, then terminate
    #[inline]
    pub fn fatal_err_with_fields(
        &self,
        ctx: Option<&LogContext>,
        err: &dyn Error,
        fields: &Fields,
        message: impl Into<String>,
    ) {
        self.log(ctx, LogLevel::Fatal, Some(err), Some(fields), message);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Providers not released through `close` are released here
        for provider in self.providers.get_mut().drain(..) {
            if let Err(e) = provider.close(None) {
                report_stderr(
                    "ERROR",
                    &format!(
                        "Failed to close provider '{}' during shutdown: {}",
                        provider.name(),
                        e
                    ),
                );
            }
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Defaults: empty [`LoggerConfig`], [`DefaultFieldsHandler`], no providers,
/// [`ProcessExit`] termination.
///
/// # Example
/// ```
/// use fanout_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .provider(ConsoleProvider::new(ProviderConfig::new(LogLevel::Debug)))
///     .terminator(|message: &str| eprintln!("would exit: {}", message))
///     .build();
///
/// logger.fatal(None, "shutting down");
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    fields_handler: Box<dyn FieldsHandler>,
    providers: Vec<Box<dyn Provider>>,
    terminator: Box<dyn Terminator>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            fields_handler: Box::new(DefaultFieldsHandler),
            providers: Vec::new(),
            terminator: Box::new(ProcessExit),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields_handler<H: FieldsHandler + 'static>(mut self, handler: H) -> Self {
        self.fields_handler = Box::new(handler);
        self
    }

    /// Append a provider; providers are dispatched in the order added
    #[must_use = "builder methods return a new value"]
    pub fn provider<P: Provider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_provider(mut self, provider: Box<dyn Provider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Replace the strategy run after a fatal record is dispatched
    #[must_use = "builder methods return a new value"]
    pub fn terminator<T: Terminator + 'static>(mut self, terminator: T) -> Self {
        self.terminator = Box::new(terminator);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger::from_parts(
            self.config,
            self.fields_handler,
            self.providers,
            self.terminator,
        )
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        level: LogLevel,
        message: String,
        fields: Fields,
    }

    #[derive(Clone)]
    struct Recorder {
        min_level: LogLevel,
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl Recorder {
        fn new(min_level: LogLevel) -> Self {
            Self {
                min_level,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }
    }

    impl Provider for Recorder {
        fn write(
            &self,
            _ctx: Option<&LogContext>,
            level: LogLevel,
            message: &str,
            fields: &Fields,
        ) -> Result<()> {
            self.calls.lock().push(Call {
                level,
                message: message.to_string(),
                fields: fields.clone(),
            });
            Ok(())
        }

        fn should_log(&self, _ctx: Option<&LogContext>, level: LogLevel) -> bool {
            level >= self.min_level
        }

        fn close(&self, _ctx: Option<&LogContext>) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    fn logger_with(recorder: &Recorder) -> Logger {
        Logger::builder()
            .provider(recorder.clone())
            .terminator(|_: &str| {})
            .build()
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build();
        assert_eq!(logger.provider_count(), 0);
        assert_eq!(logger.config(), &LoggerConfig::default());

        logger.info(None, "nobody listening");
        assert_eq!(logger.metrics().records_dispatched(), 1);
        assert_eq!(logger.metrics().provider_writes(), 0);
    }

    #[test]
    fn test_plain_call_has_no_fields() {
        let recorder = Recorder::new(LogLevel::Debug);
        let logger = logger_with(&recorder);

        logger.warning(None, format!("disk at {}%", 91));

        assert_eq!(
            recorder.calls(),
            vec![Call {
                level: LogLevel::Warn,
                message: "disk at 91%".to_string(),
                fields: Fields::new(),
            }]
        );
    }

    #[test]
    fn test_err_variant_adds_error_field() {
        let recorder = Recorder::new(LogLevel::Debug);
        let logger = logger_with(&recorder);
        let err = LoggerError::other("connection refused");

        logger.error_err(None, &err, "upstream call failed");

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].fields,
            Fields::new().with("error", "connection refused")
        );
    }

    #[test]
    fn test_error_argument_wins_over_error_field() {
        let recorder = Recorder::new(LogLevel::Debug);
        let logger = logger_with(&recorder);
        let err = LoggerError::other("real cause");
        let fields = Fields::new().with("error", "stale").with("attempt", 3);

        logger.info_err_with_fields(None, &err, &fields, "retrying");

        let calls = recorder.calls();
        assert_eq!(
            calls[0].fields,
            Fields::new().with("error", "real cause").with("attempt", 3)
        );
        assert_eq!(fields.get("error").and_then(|v| v.as_str()), Some("stale"));
    }

    #[test]
    fn test_context_trace_id_folded_in() {
        let recorder = Recorder::new(LogLevel::Debug);
        let logger = logger_with(&recorder);
        let ctx = LogContext::new().with_trace_id("T-1");

        logger.debug_with_fields(Some(&ctx), &Fields::new().with("k", "v"), "step");

        assert_eq!(
            recorder.calls()[0].fields,
            Fields::new().with("k", "v").with("trace_id", "T-1")
        );
    }

    #[test]
    fn test_filtered_levels_never_written() {
        let recorder = Recorder::new(LogLevel::Error);
        let logger = logger_with(&recorder);

        logger.debug(None, "d");
        logger.info(None, "i");
        logger.warning(None, "w");
        logger.error(None, "e");

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].message, "e");
        assert_eq!(logger.metrics().filtered(), 3);
    }

    #[test]
    fn test_fatal_terminates_after_write() {
        let recorder = Recorder::new(LogLevel::Debug);
        let terminated = Arc::new(Mutex::new(Vec::<(String, usize)>::new()));
        let seen = Arc::clone(&terminated);
        let calls = Arc::clone(&recorder.calls);

        let logger = Logger::builder()
            .provider(recorder.clone())
            .terminator(move |message: &str| {
                seen.lock().push((message.to_string(), calls.lock().len()));
            })
            .build();

        let err = LoggerError::other("corrupt index");
        logger.fatal_err(None, &err, "cannot start");

        assert_eq!(
            terminated.lock().clone(),
            vec![("cannot start: corrupt index".to_string(), 1)]
        );
        assert_eq!(recorder.calls()[0].level, LogLevel::Fatal);
    }

    #[test]
    fn test_close_drains_providers() {
        let recorder = Recorder::new(LogLevel::Debug);
        let logger = logger_with(&recorder);

        let results = logger.close(None);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
        assert_eq!(logger.provider_count(), 0);

        logger.info(None, "after close");
        assert!(recorder.calls().is_empty());
        assert!(logger.close(None).is_empty());
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_new_default_uses_console() {
        use crate::core::ProviderConfig;

        let logger = Logger::new_default(
            ProviderConfig::new(LogLevel::Fatal).with_base(LoggerConfig::new().with_name("svc")),
            DefaultFieldsHandler::new(),
        );
        assert_eq!(logger.provider_names(), vec!["console".to_string()]);
        assert_eq!(logger.config().name.as_deref(), Some("svc"));
    }
}
