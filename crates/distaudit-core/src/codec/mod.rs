//! Snapshot markup codec.
//!
//! - [`tokenizer`]: markup → start/text/end events
//! - [`parser`]: events → [`Snapshot`](crate::model::Snapshot)
//! - [`render`]: snapshots and reconciliations → markup

pub mod parser;
pub mod render;
pub mod tokenizer;

pub use parser::{parse_snapshot, parse_snapshot_bytes, SnapshotParser};
pub use render::{render_audit, render_diff_fragment, render_snapshot, wrap_page, AuditSection};
pub use tokenizer::{tokenize, MarkupHandler};
