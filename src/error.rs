//! Error types for remedy operations.
//!
//! This module defines [`RemedyError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Failures local to one ailment (a probe or a treatment step) are caught
//!   and attributed to that ailment; they never abort a whole run
//! - Registry composition errors and an unreadable project are fatal
//! - Use `anyhow::Error` (via `RemedyError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for remedy operations.
#[derive(Debug, Error)]
pub enum RemedyError {
    /// Two ailments with the same identifier were registered together.
    #[error("Duplicate ailment '{id}' in registry")]
    DuplicateAilment { id: String },

    /// An ailment's detection probe failed.
    #[error("Probe for '{ailment}' failed: {message}")]
    ProbeFailed { ailment: String, message: String },

    /// A treatment stopped early at the given one-based step.
    #[error("Treatment of '{ailment}' failed at step {step}: {message}")]
    TreatmentFailed {
        ailment: String,
        step: usize,
        message: String,
    },

    /// An ailment id was requested that the registry does not know.
    #[error("Unknown ailment: {id}")]
    UnknownAilment { id: String },

    /// The project directory cannot be read.
    #[error("Project directory is not readable: {path}")]
    ProjectUnreadable { path: PathBuf },

    /// Failed to parse the project configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A remote API answered with a body of the wrong shape.
    #[error("Unexpected response format from {url}: {message}")]
    ApiFormat { url: String, message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for remedy operations.
pub type Result<T> = std::result::Result<T, RemedyError>;
