//! Reconciliation output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.

use crate::model::{DigestKind, ResourceRecord};
use serde::{Deserialize, Serialize};

/// Which snapshot of a comparison a warning refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Older,
    Newer,
}

/// Result of reconciling a newer snapshot against an older one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reconciliation {
    /// Present in newer, absent in older
    pub added: Vec<ResourceRecord>,
    /// Present in older, absent in newer
    pub removed: Vec<ResourceRecord>,
    /// Present in both with at least one differing digest (newer's copy)
    pub modified: Vec<ResourceRecord>,
    /// Non-fatal record problems seen on either side
    pub warnings: Vec<RecordWarning>,
}

impl Reconciliation {
    /// True when nothing was added, removed or modified
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// A non-fatal problem with one record.
///
/// Missing digests still take part in reconciliation (an empty digest differs
/// from a populated one); they are surfaced so an operator can look into them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum RecordWarning {
    /// One or more digests were empty after parsing
    MissingDigest {
        side: Side,
        directory: String,
        name: String,
        digests: Vec<DigestKind>,
    },
    /// One or more digests were not lowercase hex of the expected width
    MalformedDigest {
        side: Side,
        directory: String,
        name: String,
        digests: Vec<DigestKind>,
    },
}

/// One completed comparison of the two most recent snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditReport {
    pub older_identifier: String,
    pub newer_identifier: String,
    pub older_created: String,
    pub newer_created: String,
    pub reconciliation: Reconciliation,
    /// Rendered diff fragment
    pub fragment: String,
}

/// Outcome of asking for the latest diff.
#[derive(Debug, Clone, PartialEq)]
pub enum LatestDiff {
    /// Fewer than two snapshots exist; a first run has nothing to compare with
    InsufficientHistory { available: usize },
    Compared(AuditReport),
}

impl LatestDiff {
    pub fn report(&self) -> Option<&AuditReport> {
        match self {
            LatestDiff::Compared(report) => Some(report),
            LatestDiff::InsufficientHistory { .. } => None,
        }
    }
}
