//! Directory tree scanner
//!
//! Walks a distribution tree and fingerprints every file into a snapshot.
//! Entries are visited sorted by file name so that two scans of the same
//! tree produce records in the same order.

#![allow(clippy::result_large_err)]

use crate::errors::{walk_error, Result};
use crate::fingerprint::Fingerprint;
use distaudit_core::model::Snapshot;
use distaudit_core::{log_op_end, log_op_error, log_op_start};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::{DirEntry, WalkDir};

/// What the scanner leaves out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Directory names never descended into
    pub skip_dirs: BTreeSet<String>,
    /// Exact file names never fingerprinted
    pub skip_names: BTreeSet<String>,
    /// File extensions (without the dot) never fingerprinted
    pub skip_extensions: BTreeSet<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        let set = |items: &[&str]| -> BTreeSet<String> {
            items.iter().map(|s| s.to_string()).collect()
        };
        Self {
            skip_dirs: set(&[".svn"]),
            skip_names: set(&["KEYS"]),
            skip_extensions: set(&["sha1", "md5", "sha", "asc"]),
        }
    }
}

impl ScanOptions {
    fn skips_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.contains(name))
    }

    /// True when a file with this name is left out of the snapshot
    pub fn skips_file(&self, name: &str) -> bool {
        if self.skip_names.contains(name) {
            return true;
        }
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.skip_extensions.contains(ext))
    }
}

/// True for regular files and for links whose target is a regular file.
///
/// Linked directories are not descended into.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if !file_type.is_symlink() {
        return file_type.is_file();
    }
    match entry.path().metadata() {
        Ok(target) => target.is_file(),
        Err(err) => {
            tracing::warn!(path = %entry.path().display(), error = %err, "skipping dangling link");
            false
        }
    }
}

/// Fingerprints a directory tree
#[derive(Debug, Clone)]
pub struct Scanner {
    base_dir: PathBuf,
    options: ScanOptions,
}

impl Scanner {
    pub fn new(base_dir: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self {
            base_dir: base_dir.into(),
            options,
        }
    }

    /// Scan the tree into a snapshot stamped `created_at`.
    ///
    /// Each record's directory is the path of the directory holding the file,
    /// as reached from the base directory.
    ///
    /// # Errors
    ///
    /// - `Io` / `NotFound` — the tree cannot be walked or a file cannot be read
    pub fn scan(&self, created_at: &str) -> Result<Snapshot> {
        let started = Instant::now();
        let base = self.base_dir.display().to_string();
        log_op_start!("scan", base_dir = %base, created_at = created_at);

        match self.walk(created_at) {
            Ok(snapshot) => {
                log_op_end!(
                    "scan",
                    duration_ms = started.elapsed().as_millis() as u64,
                    base_dir = %base,
                    resource_count = snapshot.len() as u64
                );
                Ok(snapshot)
            }
            Err(err) => {
                log_op_error!(
                    "scan",
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    base_dir = %base
                );
                Err(err)
            }
        }
    }

    fn walk(&self, created_at: &str) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new(created_at);

        let walker = WalkDir::new(&self.base_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.options.skips_dir(entry));

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(&self.base_dir, e))?;
            if !is_regular_file(&entry) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if self.options.skips_file(&name) {
                tracing::debug!(path = %entry.path().display(), "skipping file");
                continue;
            }

            let directory = entry
                .path()
                .parent()
                .unwrap_or(self.base_dir.as_path())
                .display()
                .to_string();
            let fingerprint = Fingerprint::of_file(entry.path())?;
            snapshot.push(fingerprint.into_record(directory, name));
        }

        Ok(snapshot)
    }
}
