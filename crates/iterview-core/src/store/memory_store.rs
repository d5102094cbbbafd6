//! In-process content store

use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

use super::ContentStore;
use crate::error::{IterviewError, IterviewResult};

/// SHA-256 content addressing with blobs kept in memory
///
/// Blobs are shared across repositories. Useful where no git executable is
/// available and in tests.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the SHA-256 hash of content
    pub fn compute_hash(content: &[u8]) -> String {
        format!("{:x}", Sha256::digest(content))
    }

    /// Number of distinct blobs stored
    pub fn blob_count(&self) -> usize {
        self.blobs.read().len()
    }

    fn record(&self, contents: Vec<Vec<u8>>, write: bool) -> Vec<String> {
        let hashes: Vec<String> = contents.iter().map(|c| Self::compute_hash(c)).collect();
        if write {
            let mut blobs = self.blobs.write();
            for (hash, content) in hashes.iter().zip(contents) {
                blobs.entry(hash.clone()).or_insert(content);
            }
        }
        hashes
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn hash_paths(
        &self,
        repo: &Path,
        paths: &[String],
        write: bool,
    ) -> IterviewResult<Vec<String>> {
        let mut contents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = tokio::fs::read(repo.join(path))
                .await
                .map_err(|e| IterviewError::hash_batch(repo, format!("{}: {}", path, e)))?;
            contents.push(content);
        }
        Ok(self.record(contents, write))
    }

    fn hash_paths_blocking(
        &self,
        repo: &Path,
        paths: &[String],
        write: bool,
    ) -> IterviewResult<Vec<String>> {
        let contents = paths
            .iter()
            .map(|path| {
                std::fs::read(repo.join(path))
                    .map_err(|e| IterviewError::hash_batch(repo, format!("{}: {}", path, e)))
            })
            .collect::<IterviewResult<Vec<_>>>()?;
        Ok(self.record(contents, write))
    }

    async fn read_blob(&self, _repo: &Path, hash: &str) -> IterviewResult<Option<Vec<u8>>> {
        Ok(self.blobs.read().get(hash).cloned())
    }
}
