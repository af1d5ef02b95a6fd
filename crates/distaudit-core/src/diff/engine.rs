//! Latest-diff computation.
//!
//! The core entry point is [`compute_latest_diff`], which selects the two most
//! recent snapshots of a prefix from a [`SnapshotSource`], reconciles them and
//! renders the diff fragment.

#![allow(clippy::result_large_err)]

use crate::codec::render_diff_fragment;
use crate::diff::model::{AuditReport, LatestDiff};
use crate::errors::ExError;
use crate::selector::{load_snapshot, select_latest, SnapshotSource};
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Compare the two most recent snapshots of `prefix`.
///
/// Returns [`LatestDiff::InsufficientHistory`] when fewer than two snapshot
/// documents exist; that is the normal outcome of a first run.
///
/// # Errors
///
/// - any listing or loading error of the source
/// - `MalformedMarkup`, `InvalidIdentifier`, `DateMismatch` — from
///   [`load_snapshot`]; the comparison is abandoned and the error names the
///   offending identifier
pub fn compute_latest_diff<S: SnapshotSource + ?Sized>(
    source: &S,
    prefix: &str,
) -> Result<LatestDiff, ExError> {
    let started = Instant::now();
    log_op_start!("compute_latest_diff", prefix = prefix);

    let result = compare_latest(source, prefix);
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(LatestDiff::Compared(report)) => {
            log_op_end!(
                "compute_latest_diff",
                duration_ms = duration_ms,
                prefix = prefix,
                added = report.reconciliation.added.len() as u64,
                removed = report.reconciliation.removed.len() as u64,
                modified = report.reconciliation.modified.len() as u64
            );
        }
        Ok(LatestDiff::InsufficientHistory { available }) => {
            log_op_end!(
                "compute_latest_diff",
                duration_ms = duration_ms,
                prefix = prefix,
                available = *available as u64
            );
        }
        Err(err) => {
            log_op_error!(
                "compute_latest_diff",
                err.clone(),
                duration_ms = duration_ms,
                prefix = prefix
            );
        }
    }
    result
}

fn compare_latest<S: SnapshotSource + ?Sized>(
    source: &S,
    prefix: &str,
) -> Result<LatestDiff, ExError> {
    let identifiers = source.list()?;
    let latest = select_latest(&identifiers, prefix);

    let (older_identifier, newer_identifier) = match latest.as_slice() {
        [older, newer] => (older.clone(), newer.clone()),
        _ => {
            return Ok(LatestDiff::InsufficientHistory {
                available: latest.len(),
            })
        }
    };

    let older = load_snapshot(source, &older_identifier)?;
    let newer = load_snapshot(source, &newer_identifier)?;

    let reconciliation = newer.reconcile(&older);
    let fragment = render_diff_fragment(prefix, &newer, &older, &reconciliation);

    Ok(LatestDiff::Compared(AuditReport {
        older_identifier,
        newer_identifier,
        older_created: older.created_at,
        newer_created: newer.created_at,
        reconciliation,
        fragment,
    }))
}
