//! Optional TOML configuration file
//!
//! ```toml
//! dir = "/srv/audit"
//! prefix = "incubator"
//! skip_dirs = [".svn", ".git"]
//! skip_names = ["KEYS"]
//! skip_extensions = ["sha1", "md5", "sha", "asc"]
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

#![allow(clippy::result_large_err)]

use crate::errors::{config_error, io_error, Result};
use crate::scanner::ScanOptions;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DIR: &str = "audit";
pub const DEFAULT_PREFIX: &str = "audit";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Directory holding snapshot documents
    pub dir: Option<PathBuf>,
    /// Snapshot file name prefix
    pub prefix: Option<String>,
    pub skip_dirs: Option<Vec<String>>,
    pub skip_names: Option<Vec<String>>,
    pub skip_extensions: Option<Vec<String>>,
}

impl AuditConfig {
    /// Parse configuration text; `origin` is only used in error messages
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(origin, e.to_string()))
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| io_error("load_config", path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Load `path` when given, otherwise use an empty configuration
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Snapshot directory: `flag`, then the file, then the default
    pub fn resolve_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR))
    }

    /// Snapshot prefix: `flag`, then the file, then the default
    pub fn resolve_prefix(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.prefix.clone())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
    }

    /// Scanner options, with unset lists falling back to the defaults
    pub fn scan_options(&self) -> ScanOptions {
        let defaults = ScanOptions::default();
        let pick = |configured: &Option<Vec<String>>, default: BTreeSet<String>| match configured {
            Some(items) => items.iter().cloned().collect(),
            None => default,
        };
        ScanOptions {
            skip_dirs: pick(&self.skip_dirs, defaults.skip_dirs),
            skip_names: pick(&self.skip_names, defaults.skip_names),
            skip_extensions: pick(&self.skip_extensions, defaults.skip_extensions),
        }
    }
}
