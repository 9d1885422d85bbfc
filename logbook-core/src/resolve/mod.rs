//! Project path → log directory resolution
//!
//! The chat tool stores each project's sessions in a directory whose name
//! encodes the project path, e.g. `/home/dev/app` becomes `-home-dev-app`
//! and `C:\code\app` becomes `C--code-app`. The encoding is undocumented
//! and lossy for non-ASCII characters, so [`PathResolver`] matches
//! heuristically instead of re-encoding:
//!
//! 1. Reduce the project path to ASCII keyword tokens ([`PathKeywords`]).
//! 2. Score every directory under the log root ([`score::score_name`]).
//! 3. Keep the highest score; the listing is sorted by name first so ties
//!    resolve the same way on every filesystem.
//!
//! A miss is not an error: callers treat `None` as "no sessions".

mod keywords;
mod score;

pub use keywords::{keyword_token, PathKeywords, PathStyle};
pub use score::{best_match, score_name, MatchCandidate};

use crate::types::LogDirectoryEntry;
use std::fs;
use std::path::Path;

/// Maps project paths to session log directories.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    style: PathStyle,
}

impl PathResolver {
    /// Resolver using the running platform's path convention.
    pub fn new() -> Self {
        Self {
            style: PathStyle::native(),
        }
    }

    /// Resolver for an explicit path convention (for testing).
    pub fn with_style(style: PathStyle) -> Self {
        Self { style }
    }

    /// Keyword tokens and prefix derived from a project path.
    pub fn keywords(&self, project_path: &Path) -> PathKeywords {
        PathKeywords::from_path(&project_path.to_string_lossy(), self.style)
    }

    /// Index of the best matching name in `names`, without touching disk.
    pub fn best_match<S: AsRef<str>>(&self, project_path: &Path, names: &[S]) -> Option<usize> {
        best_match(&self.keywords(project_path), names).map(|candidate| candidate.index)
    }

    /// Find the log directory under `log_root` that best matches `project_path`.
    pub fn resolve(&self, project_path: &Path, log_root: &Path) -> Option<LogDirectoryEntry> {
        let entries = list_log_directories(log_root);
        if entries.is_empty() {
            tracing::info!(
                log_root = %log_root.display(),
                "No log directories to match against"
            );
            return None;
        }

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        let keywords = self.keywords(project_path);
        let Some(best) = best_match(&keywords, &names) else {
            tracing::info!(
                project = %project_path.display(),
                candidates = entries.len(),
                tokens = ?keywords.tokens,
                "No log directory matched project"
            );
            return None;
        };

        let entry = entries.into_iter().nth(best.index)?;
        tracing::info!(
            project = %project_path.display(),
            directory = %entry.name,
            score = best.score,
            "Resolved log directory"
        );
        Some(entry)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Sub-directories of `log_root`, sorted by name.
///
/// Returns an empty list when the root is missing or unreadable. Entries
/// that cannot be inspected are skipped.
pub fn list_log_directories(log_root: &Path) -> Vec<LogDirectoryEntry> {
    let read_dir = match fs::read_dir(log_root) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            tracing::debug!(
                log_root = %log_root.display(),
                error = %e,
                "Log root not readable"
            );
            return Vec::new();
        }
    };

    let mut entries: Vec<LogDirectoryEntry> = read_dir
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| LogDirectoryEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            path: entry.path(),
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
