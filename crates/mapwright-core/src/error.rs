//! Error types for the Mapwright core library
//!
//! This module defines the error handling system for value formatting,
//! using thiserror for ergonomic error definitions and anyhow for wrapping
//! failures raised by user-supplied formatters.

use thiserror::Error;

/// Main error type for Mapwright operations
#[derive(Error, Debug)]
pub enum Error {
    /// A formatter could not be constructed
    ///
    /// Raised lazily, the first time a by-type formatter is resolved without a
    /// usable constructor, never at registration time.
    #[error("Configuration error: {message} (formatter: {formatter})")]
    Configuration {
        formatter: String,
        message: String,
    },

    /// A formatter received a value it cannot handle
    #[error("Invalid operation in formatter {formatter}: {message} (source type: {source_type})")]
    InvalidOperation {
        formatter: String,
        message: String,
        source_type: String,
    },

    /// Arbitrary failure raised by a user formatter
    #[error("Formatter {formatter} failed: {source}")]
    Formatter {
        formatter: String,
        #[source]
        source: anyhow::Error,
    },

    /// JSON serialization errors while exporting diagnostics
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error for the named formatter
    pub fn configuration(formatter: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Configuration {
            formatter: formatter.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-operation error for the named formatter
    pub fn invalid_operation(
        formatter: impl Into<String>,
        message: impl Into<String>,
        source_type: impl Into<String>,
    ) -> Self {
        Error::InvalidOperation {
            formatter: formatter.into(),
            message: message.into(),
            source_type: source_type.into(),
        }
    }

    /// Wrap an arbitrary failure from a user formatter
    pub fn formatter(formatter: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Error::Formatter {
            formatter: formatter.into(),
            source: source.into(),
        }
    }

    /// Whether this error stems from configuration rather than data
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            message: err.to_string(),
            source: err,
        }
    }
}
