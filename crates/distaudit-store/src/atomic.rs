//! Atomic write primitives
//!
//! Uses temp→rename so a reader never sees a half-written snapshot or report

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use crate::source::FsSnapshotSource;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

fn temp_path_for(target_path: &Path) -> PathBuf {
    let mut name = target_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}

/// Atomically write bytes to a file, creating parent directories
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_dir", parent, e))?;
        }
    }

    let temp_path = temp_path_for(target_path);
    fs::write(&temp_path, content).map_err(|e| io_error("write_temp", &temp_path, e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_temp", target_path, e))?;

    tracing::debug!(
        path = %target_path.display(),
        bytes = content.len(),
        "wrote file atomically"
    );
    Ok(())
}

/// Write a rendered snapshot into the snapshot directory under `identifier`
///
/// Returns the path written.
pub fn write_snapshot(dir: &Path, identifier: &str, content: &[u8]) -> Result<PathBuf> {
    let target = FsSnapshotSource::new(dir).path_of(identifier)?;
    atomic_write(&target, content)?;
    Ok(target)
}

/// Write a rendered report page to `path`
pub fn write_report(path: &Path, content: &[u8]) -> Result<()> {
    atomic_write(path, content)
}
