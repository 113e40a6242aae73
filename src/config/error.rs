//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A required environment variable was not set.
    ///
    /// The provider API key is the one setting with no usable default; the
    /// server refuses to start without it.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// A duration setting parsed to zero seconds.
    #[error("invalid value for {name}: '{value}' (must be at least 1 second)")]
    InvalidDuration { name: &'static str, value: String },
}
