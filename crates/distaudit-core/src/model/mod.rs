//! Snapshot domain model.

pub mod resource;
pub mod snapshot;

pub use resource::{DigestKind, RecordField, ResourceRecord};
pub use snapshot::{Snapshot, SnapshotIndex};
