//! JSON provider for structured logging

use crate::core::{
    Fields, LogContext, LogLevel, LoggerError, Provider, ProviderConfig, Result, TimestampFormat,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: LogLevel,
    message: &'a str,
    fields: &'a Fields,
}

/// Writes each record as a single-line JSON object (JSONL format)
///
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonProvider<W: Write + Send> {
    config: ProviderConfig,
    writer: Mutex<Option<W>>,
    timestamp_format: TimestampFormat,
}

impl<W: Write + Send> JsonProvider<W> {
    pub fn new(writer: W, config: ProviderConfig) -> Self {
        Self {
            config,
            writer: Mutex::new(Some(writer)),
            timestamp_format: TimestampFormat::Rfc3339,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl JsonProvider<BufWriter<File>> {
    /// JSON lines appended to the file at `path`
    pub fn file<P: AsRef<Path>>(path: P, config: ProviderConfig) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file), config))
    }
}

impl<W: Write + Send> Provider for JsonProvider<W> {
    fn write(
        &self,
        _ctx: Option<&LogContext>,
        level: LogLevel,
        message: &str,
        fields: &Fields,
    ) -> Result<()> {
        let record = JsonRecord {
            timestamp: self.timestamp_format.now(),
            level,
            message,
            fields,
        };
        let json = serde_json::to_string(&record)?;

        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::provider_closed(self.name()))?;
        writeln!(writer, "{}", json)?;
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
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_json_lines() {
        let buffer = SharedBuffer::default();
        let provider = JsonProvider::new(buffer.clone(), ProviderConfig::new(LogLevel::Debug))
            .with_timestamp_format(TimestampFormat::UnixMillis);

        provider
            .write(
                None,
                LogLevel::Warn,
                "cache miss",
                &Fields::new().with("key", "user:1").with("ttl", 30),
            )
            .unwrap();

        let content = buffer.contents();
        let value: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
        assert_eq!(value["level"], "warn");
        assert_eq!(value["message"], "cache miss");
        assert_eq!(value["fields"]["key"], "user:1");
        assert_eq!(value["fields"]["ttl"], 30);
        assert!(value["timestamp"].as_str().unwrap().parse::<i64>().is_ok());
    }

    #[test]
    fn test_structured_fields_nest_in_json() {
        let buffer = SharedBuffer::default();
        let provider = JsonProvider::new(buffer.clone(), ProviderConfig::new(LogLevel::Debug));
        let fields = Fields::new()
            .with("ids", vec![4, 9])
            .with("owner", serde_json::json!({"team": "infra", "oncall": true}));

        provider
            .write(None, LogLevel::Info, "batch done", &fields)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(buffer.contents().trim_end()).unwrap();
        assert_eq!(value["fields"]["ids"], serde_json::json!([4, 9]));
        assert_eq!(value["fields"]["owner"]["team"], "infra");
        assert_eq!(value["fields"]["owner"]["oncall"], true);
    }

    #[test]
    fn test_closed_provider_rejects_writes() {
        let provider = JsonProvider::new(SharedBuffer::default(), ProviderConfig::new(LogLevel::Info));
        provider.close(None).unwrap();

        let err = provider
            .write(None, LogLevel::Error, "late", &Fields::new())
            .unwrap_err();
        assert!(matches!(err, LoggerError::ProviderClosed { .. }));
    }

    #[test]
    fn test_should_log() {
        let provider = JsonProvider::new(Vec::new(), ProviderConfig::new(LogLevel::Error));
        assert!(!provider.should_log(None, LogLevel::Warn));
        assert!(provider.should_log(None, LogLevel::Error));
    }
}
