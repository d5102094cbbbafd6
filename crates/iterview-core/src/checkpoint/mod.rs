//! Checkpoint building
//!
//! Enumeration runs synchronously per repository; hashing runs as one task
//! per repository and the manifest is assembled once every task has joined.

mod builder;


pub use builder::{CheckpointBuilder, RepoScan};
