//! Content store adapters
//!
//! A content store turns file contents into content-addressed hashes and,
//! when asked, keeps the bytes so they can be read back later by hash.
//! Identical bytes always produce the identical hash, regardless of path or
//! repository.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{IterviewError, IterviewResult};

mod git_store;
mod memory_store;

pub use git_store::GitContentStore;
pub use memory_store::MemoryContentStore;

/// Trait for content-addressable blob store backends
///
/// Batch calls return exactly one hash per input path, in input order, so
/// callers can zip `paths[i]` with `hashes[i]`. The blocking and async
/// variants must produce identical results for identical inputs.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Hash repo-relative `paths`, durably storing the content when `write` is set
    async fn hash_paths(
        &self,
        repo: &Path,
        paths: &[String],
        write: bool,
    ) -> IterviewResult<Vec<String>>;

    /// Blocking variant of [`ContentStore::hash_paths`]
    fn hash_paths_blocking(
        &self,
        repo: &Path,
        paths: &[String],
        write: bool,
    ) -> IterviewResult<Vec<String>>;

    /// Read a stored blob back, `None` if the store has no such hash
    async fn read_blob(&self, repo: &Path, hash: &str) -> IterviewResult<Option<Vec<u8>>>;
}

/// Reject batches whose output does not line up with their input
pub(crate) fn check_batch_len(
    repo: &Path,
    paths: &[String],
    hashes: Vec<String>,
) -> IterviewResult<Vec<String>> {
    if hashes.len() != paths.len() {
        return Err(IterviewError::hash_batch(
            repo,
            format!(
                "expected {} hashes, store returned {}",
                paths.len(),
                hashes.len()
            ),
        ));
    }
    Ok(hashes)
}

#[cfg(test)]
mod tests;
