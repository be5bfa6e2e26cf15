//! Error types for vetted operations.
//!
//! This module defines [`VettedError`], the error type used for
//! infrastructure faults, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A project that fails a check is data (a `Fail` or `Warn` result), never an error
//! - Use `VettedError` for faults in the check-running machinery itself
//! - Use `anyhow::Error` (via `VettedError::Other`) for unexpected errors
//! - The only error that aborts a run before it starts is a broken registry

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for vetted operations.
#[derive(Debug, Error)]
pub enum VettedError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Two registrations share the same check id.
    #[error("Duplicate check id: {id}")]
    DuplicateCheckId { id: String },

    /// No registration exists for the requested check id.
    #[error("Unknown check id: {id}")]
    UnknownCheck { id: String },

    /// A relative path resolved outside of the project root.
    #[error("Path escapes project root: {path}")]
    UnsafePath { path: String },

    /// The run was cancelled before the check could complete.
    #[error("Check cancelled")]
    Cancelled,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for vetted operations.
pub type Result<T> = std::result::Result<T, VettedError>;
