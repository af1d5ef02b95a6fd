//! Resource record: one fingerprinted file in a snapshot.

use serde::{Deserialize, Serialize};

/// Field of a resource record that markup text can be appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Directory,
    Name,
    Md5,
    Sha,
    Ripemd,
}

/// The three digests making up a resource fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    Md5,
    Sha,
    Ripemd,
}

impl DigestKind {
    pub const ALL: [DigestKind; 3] = [DigestKind::Md5, DigestKind::Sha, DigestKind::Ripemd];

    /// Width of the lowercase hex encoding (MD5, SHA-512, RIPEMD-160).
    pub fn hex_len(&self) -> usize {
        match self {
            DigestKind::Md5 => 32,
            DigestKind::Sha => 128,
            DigestKind::Ripemd => 40,
        }
    }

    /// Markup class naming this digest.
    pub fn class(&self) -> &'static str {
        match self {
            DigestKind::Md5 => "md5",
            DigestKind::Sha => "sha",
            DigestKind::Ripemd => "ripe",
        }
    }
}

/// A fingerprinted file, identified by `(directory, name)`.
///
/// Records are filled incrementally while parsing; every field starts empty
/// and text is appended in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub directory: String,
    pub name: String,
    pub md5: String,
    pub sha: String,
    pub ripemd: String,
}

impl ResourceRecord {
    /// Create a fully populated record
    pub fn new(
        directory: impl Into<String>,
        name: impl Into<String>,
        md5: impl Into<String>,
        sha: impl Into<String>,
        ripemd: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
            md5: md5.into(),
            sha: sha.into(),
            ripemd: ripemd.into(),
        }
    }

    /// Create an empty record belonging to `directory`
    pub fn in_directory(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Append a text fragment to one field.
    pub fn append(&mut self, field: RecordField, text: &str) {
        let target = match field {
            RecordField::Directory => &mut self.directory,
            RecordField::Name => &mut self.name,
            RecordField::Md5 => &mut self.md5,
            RecordField::Sha => &mut self.sha,
            RecordField::Ripemd => &mut self.ripemd,
        };
        target.push_str(text);
    }

    /// Identity key
    pub fn key(&self) -> (&str, &str) {
        (&self.directory, &self.name)
    }

    pub fn digest(&self, kind: DigestKind) -> &str {
        match kind {
            DigestKind::Md5 => &self.md5,
            DigestKind::Sha => &self.sha,
            DigestKind::Ripemd => &self.ripemd,
        }
    }

    /// True when both records describe the same resource.
    pub fn matches(&self, other: &ResourceRecord) -> bool {
        self.directory == other.directory && self.name == other.name
    }

    /// True when `other` is the same resource with at least one different digest.
    ///
    /// An empty digest on one side and a populated one on the other counts as
    /// a difference.
    pub fn is_modified_relative_to(&self, other: &ResourceRecord) -> bool {
        self.matches(other) && !self.same_fingerprint(other)
    }

    fn same_fingerprint(&self, other: &ResourceRecord) -> bool {
        self.md5 == other.md5 && self.sha == other.sha && self.ripemd == other.ripemd
    }

    /// Digests that are empty after parsing
    pub fn missing_digests(&self) -> Vec<DigestKind> {
        DigestKind::ALL
            .into_iter()
            .filter(|kind| self.digest(*kind).is_empty())
            .collect()
    }

    /// Digests that are present but not lowercase hex of the expected width
    pub fn malformed_digests(&self) -> Vec<DigestKind> {
        DigestKind::ALL
            .into_iter()
            .filter(|kind| {
                let value = self.digest(*kind);
                !value.is_empty() && !is_lower_hex(value, kind.hex_len())
            })
            .collect()
    }
}

/// Ordering used when rendering: name first, then the remaining key fields.
impl Ord for ResourceRecord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.name, &self.directory, &self.md5, &self.sha, &self.ripemd).cmp(&(
            &other.name,
            &other.directory,
            &other.md5,
            &other.sha,
            &other.ripemd,
        ))
    }
}

impl PartialOrd for ResourceRecord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn is_lower_hex(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
