//! Configuration errors

use std::path::Path;

use super::ResembedError;

/// Creates a missing argument error
pub fn missing_argument(name: impl Into<String>) -> ResembedError {
    ResembedError::MissingArgument { name: name.into() }
}

/// Creates a configuration parse error
pub fn parse_failed(path: &Path, reason: impl ToString) -> ResembedError {
    ResembedError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an invalid glob pattern error
pub fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> ResembedError {
    ResembedError::InvalidPattern {
        pattern: pattern.into(),
        reason: reason.to_string(),
    }
}
