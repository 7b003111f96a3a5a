//! Error types for the alog logging engine.
//!
//! Setup errors are raised synchronously and leave the registry untouched.
//! Runtime operations on indentation, metadata and toggles are total and have
//! no error path.

use thiserror::Error;

/// Top-level error type for alog operations.
#[derive(Error, Debug)]
pub enum AlogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Level/filter parsing and logging errors
    #[error("Logging error: {0}")]
    Log(#[from] LogError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the registry and level parsing.
#[derive(Error, Debug)]
pub enum LogError {
    /// A level name that is not one of the known levels
    #[error("Invalid Log Level Spec [{0}]")]
    InvalidLevelSpec(String),

    /// A filter spec token that is not exactly `CHANNEL:level`
    #[error("Invalid Log Spec [{0}]")]
    InvalidFilterSpec(String),

    /// A formatter name that is not one of the known formatters
    #[error("Unknown formatter [{0}]")]
    UnknownFormatter(String),

    /// A call site tried to emit an entry at the `off` pseudo-level
    #[error("Logging to 'off' is not allowed")]
    LoggingToOffDisallowed,

    /// Writing a formatted line to a sink failed
    #[error("Sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Convenience type alias for alog results.
pub type Result<T> = std::result::Result<T, AlogError>;

/// Convenience type alias for registry-level results.
pub type LogResult<T> = std::result::Result<T, LogError>;
