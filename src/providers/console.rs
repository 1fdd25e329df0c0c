//! Console provider implementation

use super::text;
use crate::core::{Fields, LogContext, LogLevel, Provider, ProviderConfig, Result, TimestampFormat};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;

/// Writes one text line per record to stdout.
///
/// Colors are off by default so the output layout is exactly
/// `[YYYY-MM-DD HH:MM:SS] <level> "<message>" <fields>`.
pub struct ConsoleProvider {
    config: ProviderConfig,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
            out: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    /// Send lines to `writer` instead of stdout
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.out = Mutex::new(Box::new(writer));
        self
    }

    /// Color the level name
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this provider
    ///
    /// # Examples
    ///
    /// ```
    /// use fanout_logger::{ConsoleProvider, LogLevel, ProviderConfig, TimestampFormat};
    ///
    /// let provider = ConsoleProvider::new(ProviderConfig::new(LogLevel::Info))
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn format_record(&self, level: LogLevel, message: &str, fields: &Fields) -> String {
        let level_str = if self.use_colors {
            level.to_str().color(level.color_code()).to_string()
        } else {
            level.to_str().to_string()
        };

        text::format_line(&self.timestamp_format.now(), &level_str, message, fields)
    }
}

impl Provider for ConsoleProvider {
    fn write(
        &self,
        _ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        fields: &Fields,
    ) -> Result<()> {
        let mut line = self.format_record(level, message, fields);
        line.push('\n');
        self.out.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn should_log(&self, _ctx: Option<&LogContext>, level: LogLevel) -> bool {
        level >= self.config.level
    }

    fn close(&self, _ctx: Option<&LogContext>) -> Result<()> {
        self.out.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
