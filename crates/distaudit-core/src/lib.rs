//! distaudit Core - snapshot parsing, reconciliation and diff rendering
//!
//! This crate provides the pure, I/O-free part of the audit comparator:
//! - Snapshot and resource record models
//! - A class-driven incremental parser for snapshot markup and diff fragments
//! - Reconciliation of two snapshots into added / removed / modified sets
//! - Deterministic rendering of snapshots, diff fragments and report pages
//! - Selection and date validation of the two most recent snapshots
//!
//! Filesystem access lives in `distaudit-store`, behind [`SnapshotSource`].

pub mod codec;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod selector;

#[doc(hidden)]
pub use distaudit_core_types::schema as log_schema;

// Re-export commonly used types
pub use codec::{
    parse_snapshot, render_audit, render_diff_fragment, render_snapshot, wrap_page, AuditSection,
};
pub use diff::{compute_latest_diff, AuditReport, LatestDiff, Reconciliation, RecordWarning};
pub use errors::{AuditError, ExError, ExErrorKind, Result};
pub use model::{DigestKind, ResourceRecord, Snapshot};
pub use selector::{load_snapshot, select_latest, snapshot_identifier, SnapshotSource};
