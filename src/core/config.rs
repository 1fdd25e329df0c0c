//! Logger and provider configuration

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// Base configuration shared by a logger and its providers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Name identifying the logger in diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Configuration owned by a single provider
///
/// # Example
///
/// ```
/// use fanout_logger::{LogLevel, ProviderConfig};
///
/// let config = ProviderConfig::from_json(r#"{"name": "api", "level": "warning"}"#).unwrap();
/// assert_eq!(config.level, LogLevel::Warn);
/// assert_eq!(config.base.name.as_deref(), Some("api"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(flatten)]
    pub base: LoggerConfig,

    /// Minimum level the provider emits
    #[serde(default)]
    pub level: LogLevel,
}

impl ProviderConfig {
    pub fn new(level: LogLevel) -> Self {
        Self {
            base: LoggerConfig::default(),
            level,
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: LoggerConfig) -> Self {
        self.base = base;
        self
    }

    /// Reject a blank provider name
    pub fn validate(&self) -> Result<()> {
        match self.base.name.as_deref() {
            Some(name) if name.trim().is_empty() => Err(LoggerError::config(
                "ProviderConfig",
                "name must not be blank when set",
            )),
            _ => Ok(()),
        }
    }

    /// Parse and validate a provider configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
