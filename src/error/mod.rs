//! Error types and handling for resembed
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`fs`]: File system errors
//! - [`config`]: Configuration and argument errors
//!
//! Every variant maps to its own process exit code (see [`ResembedError::exit_code`]),
//! so build scripts can tell a missing resource root from a failed write.

pub mod config;
pub mod fs;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for resembed operations
#[derive(Error, Diagnostic, Debug)]
pub enum ResembedError {
    // Configuration errors
    #[error("Missing required argument: {name}")]
    #[diagnostic(
        code(resembed::config::missing_argument),
        help("Usage: resembed <RESOURCE_ROOT> <OUTPUT_DIR> <NAMESPACE> [pch]")
    )]
    MissingArgument { name: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(resembed::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(resembed::config::invalid_pattern),
        help("Patterns are globs matched against forward-slash relative paths, e.g. **/*.psd")
    )]
    InvalidPattern { pattern: String, reason: String },

    // File system errors
    #[error("Resource directory not found: {path}")]
    #[diagnostic(
        code(resembed::fs::path_not_found),
        help("The resource root must exist and be a directory")
    )]
    PathNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(resembed::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(resembed::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    // Generation errors
    #[error("Identifier '{identifier}' is produced by both '{first}' and '{second}'")]
    #[diagnostic(
        code(resembed::generate::identifier_collision),
        help("Rename one of the resources; generated units are named after their sanitized path")
    )]
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Generated output is out of date: {files}")]
    #[diagnostic(
        code(resembed::generate::outdated),
        help("Run resembed without --check to regenerate the output directory")
    )]
    OutputOutdated { files: String },
}

impl ResembedError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ResembedError::MissingArgument { .. } => 2,
            ResembedError::PathNotFound { .. } => 3,
            ResembedError::FileReadFailed { .. } => 4,
            ResembedError::FileWriteFailed { .. } => 5,
            ResembedError::IdentifierCollision { .. } => 6,
            ResembedError::InvalidPattern { .. } => 7,
            ResembedError::ConfigParseFailed { .. } => 8,
            ResembedError::OutputOutdated { .. } => 9,
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ResembedError>;
