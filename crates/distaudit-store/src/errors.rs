//! Error handling for distaudit-store
//!
//! Wraps distaudit-core ExError with filesystem-specific helpers

use distaudit_core::errors::{ExError, ExErrorKind};
use std::io;
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error naming the path it concerns
///
/// A missing file or directory maps to `NotFound`, everything else to `Io`.
pub fn io_error(operation: &str, path: &Path, err: io::Error) -> ExError {
    let kind = if err.kind() == io::ErrorKind::NotFound {
        ExErrorKind::NotFound
    } else {
        ExErrorKind::Io
    };
    ExError::new(kind)
        .with_op(operation)
        .with_identifier(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an error for a directory walk failure
pub fn walk_error(base_dir: &Path, err: walkdir::Error) -> ExError {
    let path = err
        .path()
        .unwrap_or(base_dir)
        .display()
        .to_string();
    ExError::new(ExErrorKind::Io)
        .with_op("scan")
        .with_identifier(path)
        .with_message(err.to_string())
}

/// Create a configuration file error
pub fn config_error(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_config")
        .with_identifier(path.display().to_string())
        .with_message(reason)
}

/// Create an error for a snapshot identifier that cannot name a file
pub fn invalid_identifier(identifier: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidIdentifier)
        .with_op("load")
        .with_identifier(identifier)
        .with_message("identifier must be a plain file name")
}
