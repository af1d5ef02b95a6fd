//! Snapshot store selection and validated loading.
//!
//! Snapshot documents are named `{prefix}-{YYYY-MM-DD}.html`. The two most
//! recent are found by sorting identifiers lexicographically, which matches
//! chronological order only because the date suffix is fixed-width and
//! zero-padded. That is a property of the naming scheme and is not checked.

#![allow(clippy::result_large_err)]

use crate::codec::parse_snapshot_bytes;
use crate::errors::{AuditError, ExError, ExErrorKind};
use crate::model::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Extension of snapshot documents.
pub const SNAPSHOT_EXTENSION: &str = ".html";

const DATE_TOKEN_LEN: usize = 10;

/// Where snapshot documents come from.
pub trait SnapshotSource {
    /// Identifiers of every candidate document, in any order.
    ///
    /// # Errors
    ///
    /// Implementation-defined listing failures (e.g. `Io`).
    fn list(&self) -> Result<Vec<String>, ExError>;

    /// Raw markup bytes of one document.
    ///
    /// # Errors
    ///
    /// Implementation-defined read failures (e.g. `Io`, `NotFound`).
    fn load(&self, identifier: &str) -> Result<Vec<u8>, ExError>;
}

/// Identifier of the snapshot taken on `date`.
pub fn snapshot_identifier(prefix: &str, date: &str) -> String {
    format!("{}-{}{}", prefix, date, SNAPSHOT_EXTENSION)
}

/// Date token embedded in an identifier: the ten characters before `.html`.
///
/// # Errors
///
/// - `InvalidIdentifier` — no `.html` extension or too short to carry a date
pub fn expected_date_token(identifier: &str) -> Result<&str, AuditError> {
    let invalid = || AuditError::InvalidIdentifier {
        identifier: identifier.to_string(),
    };
    let stem = identifier
        .strip_suffix(SNAPSHOT_EXTENSION)
        .ok_or_else(invalid)?;
    stem.len()
        .checked_sub(DATE_TOKEN_LEN)
        .and_then(|start| stem.get(start..))
        .ok_or_else(invalid)
}

/// The (at most) two most recent identifiers for `prefix`, oldest first.
pub fn select_latest(identifiers: &[String], prefix: &str) -> Vec<String> {
    let mut candidates: Vec<&String> = identifiers
        .iter()
        .filter(|id| id.starts_with(prefix) && id.ends_with(SNAPSHOT_EXTENSION))
        .collect();
    candidates.sort();
    let skip = candidates.len().saturating_sub(2);
    candidates.into_iter().skip(skip).cloned().collect()
}

/// Load, parse and date-check one snapshot.
///
/// Records with missing or malformed digests are logged as warnings; they do
/// not fail the load.
///
/// # Errors
///
/// - any error of [`SnapshotSource::load`]
/// - `MalformedMarkup` — the document cannot be tokenized
/// - `InvalidIdentifier` — the identifier carries no date suffix
/// - `DateMismatch` — the parsed `created` token differs from the identifier's date
pub fn load_snapshot<S: SnapshotSource + ?Sized>(
    source: &S,
    identifier: &str,
) -> Result<Snapshot, ExError> {
    let started = Instant::now();
    log_op_start!("load_snapshot", identifier = identifier);

    match load_and_validate(source, identifier) {
        Ok(snapshot) => {
            for record in &snapshot.resources {
                let missing = record.missing_digests();
                if !missing.is_empty() {
                    tracing::warn!(
                        identifier = identifier,
                        directory = %record.directory,
                        name = %record.name,
                        digests = ?missing,
                        err.code = ExErrorKind::MissingDigest.code(),
                        "resource is missing digests"
                    );
                }
                let malformed = record.malformed_digests();
                if !malformed.is_empty() {
                    tracing::warn!(
                        identifier = identifier,
                        directory = %record.directory,
                        name = %record.name,
                        digests = ?malformed,
                        "resource has malformed digests"
                    );
                }
            }
            log_op_end!(
                "load_snapshot",
                duration_ms = started.elapsed().as_millis() as u64,
                identifier = identifier,
                resource_count = snapshot.len() as u64
            );
            Ok(snapshot)
        }
        Err(err) => {
            log_op_error!(
                "load_snapshot",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64,
                identifier = identifier
            );
            Err(err)
        }
    }
}

fn load_and_validate<S: SnapshotSource + ?Sized>(
    source: &S,
    identifier: &str,
) -> Result<Snapshot, ExError> {
    let bytes = source.load(identifier)?;
    let snapshot = parse_snapshot_bytes(&bytes)
        .map_err(|e| ExError::from(e).with_identifier(identifier))?;

    let expected = expected_date_token(identifier)?;
    if snapshot.created_at != expected {
        return Err(AuditError::DateMismatch {
            identifier: identifier.to_string(),
            expected: expected.to_string(),
            found: snapshot.created_at.clone(),
        }
        .into());
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expected_date_token() {
        assert_eq!(
            expected_date_token("audit-2008-01-22.html"),
            Ok("2008-01-22")
        );
        assert!(matches!(
            expected_date_token("audit-2008-01-22.xml"),
            Err(AuditError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            expected_date_token("x.html"),
            Err(AuditError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_select_latest_filters_and_orders() {
        let all = ids(&[
            "audit-2008-01-23.html",
            "audit-2008-01-21.html",
            "other-2009-01-01.html",
            "audit-2008-01-22.html",
            "audit-2008-01-24.html.asc",
        ]);
        assert_eq!(
            select_latest(&all, "audit"),
            ids(&["audit-2008-01-22.html", "audit-2008-01-23.html"])
        );
    }

    #[test]
    fn test_select_latest_short_history() {
        assert!(select_latest(&[], "audit").is_empty());
        assert_eq!(
            select_latest(&ids(&["audit-2008-01-21.html"]), "audit"),
            ids(&["audit-2008-01-21.html"])
        );
    }

    #[test]
    fn test_snapshot_identifier() {
        assert_eq!(
            snapshot_identifier("audit", "2008-01-22"),
            "audit-2008-01-22.html"
        );
    }
}
