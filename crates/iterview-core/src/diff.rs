//! Text diffs between two versions of a file

use diffy::{Line, PatchFormatter, create_patch};
use serde::{Deserialize, Serialize};

const ORIGINAL_HEADER: &str = "--- original\n+++ modified\n";

/// Insertion and deletion counts of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStat {
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffStat {
    pub fn is_empty(&self) -> bool {
        self.insertions == 0 && self.deletions == 0
    }
}

/// Unified diff of two blobs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDiff {
    /// Unified diff text, empty when the inputs are equal or binary
    pub unified: String,
    pub stat: DiffStat,
    /// Either side was not valid UTF-8 text
    pub binary: bool,
}

impl TextDiff {
    /// Diff two text blobs
    pub fn compute(old: &str, new: &str) -> Self {
        let patch = create_patch(old, new);

        let mut stat = DiffStat::default();
        for hunk in patch.hunks() {
            for line in hunk.lines() {
                match line {
                    Line::Insert(_) => stat.insertions += 1,
                    Line::Delete(_) => stat.deletions += 1,
                    Line::Context(_) => {}
                }
            }
        }

        let unified = if patch.hunks().is_empty() {
            String::new()
        } else {
            PatchFormatter::new().fmt_patch(&patch).to_string()
        };

        Self {
            unified,
            stat,
            binary: false,
        }
    }

    /// Diff two raw blobs, labelling both sides with `path`
    ///
    /// Blobs that are not UTF-8 or contain NUL bytes are reported as binary
    /// with no line counts.
    pub fn compute_bytes(old: &[u8], new: &[u8], path: &str) -> Self {
        match (as_text(old), as_text(new)) {
            (Some(old), Some(new)) => Self::compute(old, new).with_path(path),
            _ => Self {
                unified: if old == new {
                    String::new()
                } else {
                    format!("Binary files a/{path} and b/{path} differ\n")
                },
                stat: DiffStat::default(),
                binary: true,
            },
        }
    }

    /// Replace the generic file header with `a/<path>` and `b/<path>`
    pub fn with_path(mut self, path: &str) -> Self {
        if let Some(body) = self.unified.strip_prefix(ORIGINAL_HEADER) {
            self.unified = format!("--- a/{path}\n+++ b/{path}\n{body}");
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.unified.is_empty()
    }
}

fn as_text(bytes: &[u8]) -> Option<&str> {
    if bytes.contains(&0) {
        return None;
    }
    std::str::from_utf8(bytes).ok()
}
