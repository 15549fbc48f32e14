//! Hub cache layout conventions.
//!
//! The transfer mechanism writes blobs into a content-addressed cache:
//!
//! ```text
//! <cache>/models--{owner}--{name}/blobs/<blob-id>
//! <cache>/models--{owner}--{name}/blobs/<blob-id>.incomplete   (in flight)
//! ```
//!
//! The monitor only ever reads from this layout; the `.incomplete` sibling is
//! the staging artifact the partial-file poller observes.

use std::path::{Path, PathBuf};

use crate::config::RepoRef;

/// Cache folder name for a model repository.
#[must_use]
pub fn repo_folder_name(repo: &RepoRef) -> String {
    format!("models--{}--{}", repo.owner, repo.name)
}

/// Resolve the Hub cache root.
///
/// Precedence: explicit override, `HF_HUB_CACHE`, `HF_HOME` (with `hub`
/// appended), then the platform cache directory. This mirrors the resolution
/// the `hf-hub` SDK performs so the poller watches where the transfer
/// actually writes.
#[must_use]
pub fn resolve_cache_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    if let Ok(dir) = std::env::var("HF_HUB_CACHE") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Ok(home) = std::env::var("HF_HOME") {
        if !home.is_empty() {
            return PathBuf::from(home).join("hub");
        }
    }

    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("huggingface")
        .join("hub")
}

/// The blobs directory for a repository under the given cache root.
#[must_use]
pub fn blobs_dir(cache_dir: &Path, repo: &RepoRef) -> PathBuf {
    cache_dir.join(repo_folder_name(repo)).join("blobs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_name_uses_double_dash_convention() {
        let repo = RepoRef::new("coqui", "XTTS-v2");
        assert_eq!(repo_folder_name(&repo), "models--coqui--XTTS-v2");
    }

    #[test]
    fn explicit_override_wins() {
        let dir = resolve_cache_dir(Some(Path::new("/custom/cache")));
        assert_eq!(dir, PathBuf::from("/custom/cache"));
    }

    #[test]
    fn blobs_dir_nests_under_repo_folder() {
        let repo = RepoRef::new("o", "n");
        let dir = blobs_dir(Path::new("/cache"), &repo);
        assert_eq!(dir, PathBuf::from("/cache/models--o--n/blobs"));
    }
}
