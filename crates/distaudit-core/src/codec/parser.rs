//! Incremental snapshot parser.
//!
//! A non-validating, single-pass state machine driven by `class` attribute
//! values rather than element names. Two independent channels consume
//! character data:
//!
//! - the **outer** channel fills the snapshot's `created_at` token and the
//!   running directory name (`class='created'`, `class='dir'`);
//! - the **record** channel fills the fields of the most recently started
//!   resource (`class='resource'`, `'md5'`, `'sha'`, `'ripe'`).
//!
//! An element end clears the outer channel only. A record stays current
//! until the next `resource` element starts, and every record inherits the
//! directory accumulated by the last `dir` element.

use crate::codec::tokenizer::{tokenize, MarkupHandler};
use crate::errors::{AuditError, Result};
use crate::model::{RecordField, ResourceRecord, Snapshot};

/// Target of the next character data on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setter {
    None,
    Directory,
    Created,
    Name,
    Md5,
    Sha,
    Ripemd,
}

impl Setter {
    fn record_field(self) -> Option<RecordField> {
        match self {
            Setter::Name => Some(RecordField::Name),
            Setter::Md5 => Some(RecordField::Md5),
            Setter::Sha => Some(RecordField::Sha),
            Setter::Ripemd => Some(RecordField::Ripemd),
            Setter::None | Setter::Directory | Setter::Created => None,
        }
    }
}

const RESOURCE_CLASS: &str = "resource";

const OUTER_CLASSES: &[(&str, Setter)] = &[("dir", Setter::Directory), ("created", Setter::Created)];

const RECORD_CLASSES: &[(&str, Setter)] = &[
    (RESOURCE_CLASS, Setter::Name),
    ("md5", Setter::Md5),
    ("sha", Setter::Sha),
    ("ripe", Setter::Ripemd),
];

fn lookup(table: &[(&str, Setter)], class: Option<&str>) -> Setter {
    class
        .and_then(|class| table.iter().find(|(name, _)| *name == class))
        .map_or(Setter::None, |(_, setter)| *setter)
}

#[derive(Debug)]
struct RecordCursor {
    index: usize,
    pending: Setter,
}

/// Parser state for one document. Not shared between parses.
#[derive(Debug)]
pub struct SnapshotParser {
    snapshot: Snapshot,
    current_directory: String,
    outer: Setter,
    current: Option<RecordCursor>,
}

impl Default for SnapshotParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotParser {
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot::default(),
            current_directory: String::new(),
            outer: Setter::None,
            current: None,
        }
    }

    /// Consume the parser and return the snapshot built so far.
    pub fn finish(self) -> Snapshot {
        self.snapshot
    }
}

impl MarkupHandler for SnapshotParser {
    fn start_element(&mut self, class: Option<&str>) {
        match lookup(OUTER_CLASSES, class) {
            Setter::Directory => {
                self.current_directory.clear();
                self.outer = Setter::Directory;
            }
            Setter::Created => self.outer = Setter::Created,
            _ => {}
        }

        if class == Some(RESOURCE_CLASS) {
            self.snapshot
                .push(ResourceRecord::in_directory(self.current_directory.as_str()));
            self.current = Some(RecordCursor {
                index: self.snapshot.len() - 1,
                pending: Setter::None,
            });
        }

        // Every start tag, including the one that created the record, also
        // reaches the current record.
        if let Some(cursor) = self.current.as_mut() {
            cursor.pending = lookup(RECORD_CLASSES, class);
        }
    }

    fn char_data(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        if let Some(cursor) = &self.current {
            if let Some(field) = cursor.pending.record_field() {
                if let Some(record) = self.snapshot.resources.get_mut(cursor.index) {
                    record.append(field, text);
                }
            }
        }

        match self.outer {
            Setter::Directory => self.current_directory.push_str(text),
            Setter::Created => self.snapshot.created_at.push_str(text),
            _ => {}
        }
    }

    fn end_element(&mut self) {
        self.outer = Setter::None;
    }
}

/// Parse a snapshot document or audit report fragment.
///
/// Both forms are accepted; they differ only in which classed elements they
/// contain. Unknown elements and attributes are ignored.
///
/// # Errors
///
/// - `MalformedMarkup` — the document cannot be tokenized
pub fn parse_snapshot(markup: &str) -> Result<Snapshot> {
    let mut parser = SnapshotParser::new();
    tokenize(markup, &mut parser)?;
    let snapshot = parser.finish();
    tracing::debug!(
        resource_count = snapshot.len(),
        created_at = %snapshot.created_at,
        "parsed snapshot markup"
    );
    Ok(snapshot)
}

/// Parse raw document bytes, which must be UTF-8.
///
/// # Errors
///
/// - `MalformedMarkup` — invalid UTF-8 (position is the first bad byte) or
///   a tokenizer failure
pub fn parse_snapshot_bytes(bytes: &[u8]) -> Result<Snapshot> {
    let markup = std::str::from_utf8(bytes).map_err(|e| AuditError::MalformedMarkup {
        position: e.valid_up_to() as u64,
        message: format!("document is not valid UTF-8: {}", e),
    })?;
    parse_snapshot(markup)
}
