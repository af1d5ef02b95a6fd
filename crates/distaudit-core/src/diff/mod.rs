//! Snapshot comparison.
//!
//! Reconciles the two most recent snapshots of a prefix and renders the
//! result as a markup fragment.
//!
//! ## Entry point
//!
//! ```ignore
//! use distaudit_core::diff::compute_latest_diff;
//!
//! match compute_latest_diff(&source, "audit")? {
//!     LatestDiff::Compared(report) => println!("{}", report.fragment),
//!     LatestDiff::InsufficientHistory { .. } => println!("nothing to compare"),
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical resource sets render byte-identical fragments,
//!   whatever order the records were parsed in.
//! - **Totality**: every key present on exactly one side is added or removed;
//!   every key on both sides with a differing digest is modified.
//! - **No silent fallbacks**: a snapshot that fails to parse or validate aborts
//!   the comparison with the offending identifier.

pub mod engine;
pub mod model;

pub use engine::compute_latest_diff;
pub use model::{AuditReport, LatestDiff, Reconciliation, RecordWarning, Side};
