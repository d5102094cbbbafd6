//! Error types for Iterview
//!
//! Every core operation returns either a value or an [`IterviewError`].
//! "Not found" outcomes (missing checkpoint, path absent from a snapshot)
//! are modelled as `Ok(None)` by the callers, never as errors.

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{IterviewError, IterviewResult, ResultExt, UnifiedError};
