//! Change detection
//!
//! Compares a checkpoint against the live filesystem, or two checkpoints
//! against each other, producing a list of path-level changes ordered by
//! status (modified, added, deleted) and then by path.

mod compare;
mod detector;
mod types;

#[cfg(test)]
mod tests;

pub use compare::{changes_between, compare_snapshots};
pub use detector::ChangeDetector;
pub use types::{Change, ChangeStatus, sort_changes};
