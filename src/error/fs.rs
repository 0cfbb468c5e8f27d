//! File system errors

use std::path::Path;

use super::ResembedError;

/// Creates a path not found error
pub fn path_not_found(path: &Path) -> ResembedError {
    ResembedError::PathNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read error
pub fn read_failed(path: &Path, reason: impl ToString) -> ResembedError {
    ResembedError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file write error
pub fn write_failed(path: &Path, reason: impl ToString) -> ResembedError {
    ResembedError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
