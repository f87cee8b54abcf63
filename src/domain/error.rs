//! Domain error types

use thiserror::Error;

/// Errors that can occur while driving the Toptek switch interface
#[derive(Error, Debug)]
pub enum ToptekError {
    /// Device desynchronized, answered unexpectedly, or refused to reach the
    /// requested state. Also covers violated preconditions (e.g. PA off).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A requested value lies outside the device's discrete domain
    #[error("Invalid value: {0}")]
    Value(String),

    #[error("Serial port error: {0}")]
    Serial(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ToptekError {
    pub fn is_protocol(&self) -> bool {
        matches!(self, ToptekError::Protocol(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, ToptekError::Value(_))
    }
}

/// Result type alias for Toptek operations
pub type ToptekResult<T> = Result<T, ToptekError>;
