//! distaudit Store - Filesystem side of the audit
//!
//! Provides:
//! - Fingerprinting of files (MD5, SHA-512, RIPEMD-160 in one pass)
//! - A scanner turning a directory tree into a snapshot
//! - A directory-backed `SnapshotSource` and atomic report writes
//! - The optional TOML configuration file

pub mod atomic;
pub mod config;
pub mod errors;
pub mod fingerprint;
pub mod scanner;
pub mod source;

// Re-export key types
pub use config::AuditConfig;
pub use errors::Result;
pub use fingerprint::Fingerprint;
pub use scanner::{ScanOptions, Scanner};
pub use source::FsSnapshotSource;
