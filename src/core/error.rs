//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A provider failed to emit a record
    #[error("Provider '{provider}' failed to write: {message}")]
    ProviderWrite { provider: String, message: String },

    /// A provider was used after its resources were released
    #[error("Provider '{provider}' is closed")]
    ProviderClosed { provider: String },

    /// Unknown severity name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a provider write error
    pub fn provider_write(provider: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ProviderWrite {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a provider closed error
    pub fn provider_closed(provider: impl Into<String>) -> Self {
        LoggerError::ProviderClosed {
            provider: provider.into(),
        }
    }

    pub fn invalid_level(level: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(level.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
