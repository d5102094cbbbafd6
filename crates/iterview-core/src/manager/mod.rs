//! Checkpoint manager
//!
//! This module provides the high-level API front ends talk to,
//! orchestrating discovery, checkpoint creation, change detection and
//! historical retrieval. Every operation returns data only.

mod core;
mod operations;
mod types;

pub use types::{CheckpointCreated, CheckpointManager};
