//! Directory-backed snapshot source
//!
//! Identifiers are the file names of the regular files directly inside the
//! snapshot directory. Subdirectories are not visited.

#![allow(clippy::result_large_err)]

use crate::errors::{invalid_identifier, io_error, Result};
use distaudit_core::errors::ExError;
use distaudit_core::selector::SnapshotSource;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Snapshot documents stored as files in one directory
#[derive(Debug, Clone)]
pub struct FsSnapshotSource {
    dir: PathBuf,
}

impl FsSnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document named `identifier`.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` — the identifier is not a single plain file name
    pub fn path_of(&self, identifier: &str) -> Result<PathBuf> {
        let mut components = Path::new(identifier).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.dir.join(identifier)),
            _ => Err(invalid_identifier(identifier)),
        }
    }
}

impl SnapshotSource for FsSnapshotSource {
    fn list(&self) -> std::result::Result<Vec<String>, ExError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| io_error("list", &self.dir, e))?;

        let mut identifiers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("list", &self.dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| io_error("list", &entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => identifiers.push(name),
                Err(name) => tracing::warn!(
                    dir = %self.dir.display(),
                    name = ?name,
                    "skipping file whose name is not valid UTF-8"
                ),
            }
        }
        Ok(identifiers)
    }

    fn load(&self, identifier: &str) -> std::result::Result<Vec<u8>, ExError> {
        let path = self.path_of(identifier)?;
        fs::read(&path).map_err(|e| io_error("load", &path, e).with_identifier(identifier))
    }
}
