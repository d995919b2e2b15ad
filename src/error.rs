//! Error types for configurator operations.
//!
//! This module defines [`ConfiguratorError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Missing inputs (no document, no hostname, no matching environment key)
//!   are not errors; they resolve to `None` or `null`
//! - Use `ConfiguratorError` for failures a caller must act on
//! - Use `anyhow::Error` (via `ConfiguratorError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for configurator operations.
#[derive(Debug, Error)]
pub enum ConfiguratorError {
    /// A hostname pattern is not a valid regular expression.
    #[error("Invalid hostname pattern '{pattern}' for environment '{environment}': {source}")]
    InvalidPattern {
        environment: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A hostname-pattern document has the wrong shape.
    #[error("Invalid host patterns: {message}")]
    InvalidHostPatterns { message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for configurator operations.
pub type Result<T> = std::result::Result<T, ConfiguratorError>;
