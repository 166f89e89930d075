//! Error types for envcheck operations.
//!
//! This module defines [`EnvCheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `EnvCheckError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `EnvCheckError::Other`) for unexpected errors
//! - Every error is terminal for the run; nothing is retried

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for envcheck operations.
#[derive(Debug, Error)]
pub enum EnvCheckError {
    /// Settings file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A process could not be spawned at all.
    #[error("Failed to run `{command}`: {message}")]
    CommandFailed { command: String, message: String },

    /// The environment could not be activated or its listing command failed.
    #[error("Failed to activate environment '{env}' (exit code {code:?}): {stderr}")]
    EnvironmentActivation {
        env: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The environment interpreter did not report its version.
    #[error("Could not determine the Python version of environment '{env}'")]
    RuntimeVersionUnavailable { env: String },

    /// `pip show` produced no version for the package.
    #[error("Package {package} not found in environment {env}")]
    PackageNotFound { package: String, env: String },

    /// A manifest line is not a valid requirement.
    #[error("Invalid requirement in {path} line {line}: {message}")]
    ManifestParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A requirement string could not be parsed.
    #[error("Invalid requirement '{input}': {message}")]
    InvalidRequirement { input: String, message: String },

    /// A version string could not be parsed.
    #[error("Invalid version: '{input}'")]
    InvalidVersion { input: String },

    /// A version specifier could not be parsed.
    #[error("Invalid specifier '{input}': {message}")]
    InvalidSpecifier { input: String, message: String },

    /// Posting to the webhook failed.
    #[error("Error sending Teams message: {message}")]
    Notification { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envcheck operations.
pub type Result<T> = std::result::Result<T, EnvCheckError>;
