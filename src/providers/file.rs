//! File provider implementation

use super::text;
use crate::core::{
    Fields, LogContext, LogLevel, LoggerError, Provider, ProviderConfig, Result, TimestampFormat,
};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends text lines to a file.
///
/// Each record is flushed as it is written. Concurrent writers are
/// serialized by an internal lock so lines never interleave.
pub struct FileProvider {
    config: ProviderConfig,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    timestamp_format: TimestampFormat,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>, config: ProviderConfig) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            config,
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Set the timestamp format for this provider
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fanout_logger::{FileProvider, LogLevel, ProviderConfig, TimestampFormat};
    ///
    /// let provider = FileProvider::new("/var/log/app.log", ProviderConfig::new(LogLevel::Info))
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Provider for FileProvider {
    fn write(
        &self,
        _ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        fields: &Fields,
    ) -> Result<()> {
        let line = text::format_line(&self.timestamp_format.now(), level.to_str(), message, fields);

        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::provider_closed(self.name()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    fn should_log(&self, _ctx: Option<&LogContext>, level: LogLevel) -> bool {
        level >= self.config.level
    }

    fn close(&self, _ctx: Option<&LogContext>) -> Result<()> {
        match self.writer.lock().take() {
            Some(mut writer) => {
                writer.flush()?;
                Ok(())
            }
            None => Err(LoggerError::provider_closed(self.name())),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileProvider {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.get_mut().as_mut() {
            let _ = writer.flush();
        }
    }
}
