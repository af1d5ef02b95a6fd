//! Snapshot: one audit run's fingerprinted resources plus its creation token.

use crate::diff::model::{Reconciliation, RecordWarning, Side};
use crate::model::resource::ResourceRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hash index over a snapshot, keyed by `(directory, name)`.
///
/// The first record with a given key wins, matching a linear scan.
pub type SnapshotIndex<'a> = HashMap<(&'a str, &'a str), &'a ResourceRecord>;

/// A timestamped, ordered collection of resource records.
///
/// `created_at` is an opaque token compared by string equality only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub created_at: String,
    pub resources: Vec<ResourceRecord>,
}

impl Snapshot {
    pub fn new(created_at: impl Into<String>) -> Self {
        Self {
            created_at: created_at.into(),
            resources: Vec::new(),
        }
    }

    /// Build a snapshot from already populated records
    pub fn from_records(created_at: impl Into<String>, resources: Vec<ResourceRecord>) -> Self {
        Self {
            created_at: created_at.into(),
            resources,
        }
    }

    pub fn push(&mut self, record: ResourceRecord) {
        self.resources.push(record);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.resources.iter()
    }

    /// First record with the given key, by linear scan.
    pub fn find(&self, directory: &str, name: &str) -> Option<&ResourceRecord> {
        self.resources
            .iter()
            .find(|r| r.directory == directory && r.name == name)
    }

    /// Key index with first-match-wins semantics.
    pub fn index(&self) -> SnapshotIndex<'_> {
        let mut index = HashMap::with_capacity(self.resources.len());
        for record in &self.resources {
            index.entry(record.key()).or_insert(record);
        }
        index
    }

    /// True when no record in this snapshot has `record`'s key.
    pub fn is_missing(&self, record: &ResourceRecord) -> bool {
        self.find(&record.directory, &record.name).is_none()
    }

    /// True when this snapshot holds `record`'s key with different digests.
    pub fn is_modified(&self, record: &ResourceRecord) -> bool {
        self.find(&record.directory, &record.name)
            .is_some_and(|existing| record.is_modified_relative_to(existing))
    }

    /// Reconcile this (newer) snapshot against an older one.
    ///
    /// - `added`: records here whose key is absent from `older`
    /// - `removed`: records in `older` whose key is absent here
    /// - `modified`: records here whose key exists in `older` with differing digests
    ///
    /// Each list keeps the encounter order of the snapshot it is drawn from.
    pub fn reconcile(&self, older: &Snapshot) -> Reconciliation {
        let older_index = older.index();
        let newer_index = self.index();

        let mut added = Vec::new();
        let mut modified = Vec::new();
        for record in &self.resources {
            match older_index.get(&record.key()) {
                None => added.push(record.clone()),
                Some(previous) if record.is_modified_relative_to(previous) => {
                    modified.push(record.clone())
                }
                Some(_) => {}
            }
        }

        let removed = older
            .resources
            .iter()
            .filter(|record| !newer_index.contains_key(&record.key()))
            .cloned()
            .collect();

        let mut warnings = older.warnings(Side::Older);
        warnings.extend(self.warnings(Side::Newer));

        Reconciliation {
            added,
            removed,
            modified,
            warnings,
        }
    }

    /// Non-fatal problems with individual records (missing or malformed digests).
    pub fn warnings(&self, side: Side) -> Vec<RecordWarning> {
        let mut warnings = Vec::new();
        for record in &self.resources {
            let missing = record.missing_digests();
            if !missing.is_empty() {
                warnings.push(RecordWarning::MissingDigest {
                    side,
                    directory: record.directory.clone(),
                    name: record.name.clone(),
                    digests: missing,
                });
            }
            let malformed = record.malformed_digests();
            if !malformed.is_empty() {
                warnings.push(RecordWarning::MalformedDigest {
                    side,
                    directory: record.directory.clone(),
                    name: record.name.clone(),
                    digests: malformed,
                });
            }
        }
        warnings
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ResourceRecord;
    type IntoIter = std::slice::Iter<'a, ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Snapshot {
        Snapshot::from_records(
            "2008-01-22",
            vec![
                ResourceRecord::new("dir", "name", "md5", "sha", "ripemd"),
                ResourceRecord::new("dir", "name2", "2md5", "2sha", "2ripemd"),
                ResourceRecord::new("dirA", "name", "Amd5", "Asha", "Aripemd"),
                ResourceRecord::new("dirA", "nameB", "Bmd5", "Bsha", "Bripemd"),
            ],
        )
    }

    #[test]
    fn test_is_missing() {
        let s = fixture();
        assert!(!s.is_missing(&ResourceRecord::new("dir", "name", "md5", "sha", "ripemd")));
        assert!(!s.is_missing(&ResourceRecord::new("dirA", "name", "x", "y", "z")));
        assert!(s.is_missing(&ResourceRecord::new("dirC", "name", "md5", "sha", "ripemd")));
        assert!(s.is_missing(&ResourceRecord::new("dir", "nameB", "md5", "sha", "ripemd")));
    }

    #[test]
    fn test_is_modified() {
        let s = fixture();
        assert!(!s.is_modified(&ResourceRecord::new("dir", "name", "md5", "sha", "ripemd")));
        assert!(!s.is_modified(&ResourceRecord::new("dirC", "name", "md5", "sha", "ripemd")));
        assert!(s.is_modified(&ResourceRecord::new("dir", "name", "Amd5", "sha", "ripemd")));
        assert!(s.is_modified(&ResourceRecord::new("dir", "name", "md5", "Qsha", "ripemd")));
        assert!(s.is_modified(&ResourceRecord::new("dir", "name", "md5", "sha", "Tripemd")));
    }

    #[test]
    fn test_find_first_match_wins() {
        let s = Snapshot::from_records(
            "t",
            vec![
                ResourceRecord::new("d", "n", "first", "", ""),
                ResourceRecord::new("d", "n", "second", "", ""),
            ],
        );
        assert_eq!(s.find("d", "n").map(|r| r.md5.as_str()), Some("first"));
        assert_eq!(s.index()[&("d", "n")].md5, "first");
    }

    #[test]
    fn test_reconcile_against_empty() {
        let full = fixture();
        let empty = Snapshot::new("2008-01-21");

        let r = full.reconcile(&empty);
        assert_eq!(r.added.len(), 4);
        assert!(r.removed.is_empty());
        assert!(r.modified.is_empty());

        let r = empty.reconcile(&full);
        assert!(r.added.is_empty());
        assert_eq!(r.removed.len(), 4);
        assert!(r.modified.is_empty());
    }

    #[test]
    fn test_reconcile_differing() {
        let older = fixture();
        let modified_record = ResourceRecord::new("dir", "name", "NOT", "NOT", "NOT");
        let new_record = ResourceRecord::new("anotherdir", "anothername", "NOT", "NOT", "NOT");
        let newer = Snapshot::from_records(
            "2008-01-23",
            vec![
                modified_record.clone(),
                new_record.clone(),
                ResourceRecord::new("dirA", "name", "Amd5", "Asha", "Aripemd"),
                ResourceRecord::new("dirA", "nameB", "Bmd5", "Bsha", "Bripemd"),
            ],
        );

        let r = newer.reconcile(&older);
        assert_eq!(r.modified, vec![modified_record]);
        assert_eq!(r.added, vec![new_record]);
        assert_eq!(
            r.removed,
            vec![ResourceRecord::new("dir", "name2", "2md5", "2sha", "2ripemd")]
        );
    }

    #[test]
    fn test_reconcile_collects_missing_digest_warnings() {
        let older = Snapshot::from_records("a", vec![ResourceRecord::new("d", "n", "m", "s", "r")]);
        let newer = Snapshot::from_records("b", vec![ResourceRecord::new("d", "n", "m", "", "r")]);

        let r = newer.reconcile(&older);
        assert_eq!(r.modified.len(), 1);
        assert!(r.warnings.iter().any(|w| matches!(
            w,
            RecordWarning::MissingDigest { side: Side::Newer, name, .. } if name == "n"
        )));
    }
}
