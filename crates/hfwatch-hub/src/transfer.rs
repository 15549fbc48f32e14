//! Blocking transfer collaborator backed by the `hf-hub` SDK.
//!
//! The SDK call is treated as opaque: it blocks until the file lands at its
//! final cache location and reports nothing in between. The adapter wraps it
//! in `spawn_blocking` so the poller keeps ticking while a transfer is in
//! flight.

use std::path::PathBuf;

use async_trait::async_trait;

use hfwatch_core::transfer::{FileEntry, MonitorError, MonitorResult};
use hfwatch_core::ports::FileTransferPort;

use crate::cache::resolve_cache_dir;
use crate::config::{HubConfig, RepoRef};

/// [`FileTransferPort`] implementation downloading from the Hub.
///
/// Each `transfer` call fully succeeds (the file is in the cache at its
/// final blob location) or fails; there is no resume and no retry here.
pub struct HubTransfer {
    repo_id: String,
    revision: String,
    cache_dir: PathBuf,
    token: Option<String>,
}

impl HubTransfer {
    /// Create a transfer adapter for one repository at one revision.
    #[must_use]
    pub fn new(repo: &RepoRef, revision: impl Into<String>, config: &HubConfig) -> Self {
        Self {
            repo_id: repo.id(),
            revision: revision.into(),
            cache_dir: resolve_cache_dir(config.cache_dir.as_deref()),
            token: config.token.clone(),
        }
    }

    /// The cache root this adapter downloads into.
    ///
    /// The poller must watch the same root, so composition code reads it
    /// from here rather than resolving twice.
    #[must_use]
    pub fn cache_dir(&self) -> &std::path::Path {
        &self.cache_dir
    }
}

#[async_trait]
impl FileTransferPort for HubTransfer {
    async fn transfer(&self, file: &FileEntry) -> MonitorResult<()> {
        let repo_id = self.repo_id.clone();
        let revision = self.revision.clone();
        let cache_dir = self.cache_dir.clone();
        let token = self.token.clone();
        let path = file.path.clone();

        tracing::debug!(repo = %repo_id, file = %path, "starting blocking transfer");

        let result = tokio::task::spawn_blocking(move || {
            let api = hf_hub::api::sync::ApiBuilder::new()
                .with_cache_dir(cache_dir)
                .with_token(token)
                .with_progress(false)
                .build()
                .map_err(|e| format!("failed to create Hub API client: {e}"))?;

            let repo = api.repo(hf_hub::Repo::with_revision(
                repo_id,
                hf_hub::RepoType::Model,
                revision,
            ));

            repo.get(&path).map_err(|e| e.to_string())
        })
        .await;

        match result {
            Ok(Ok(local_path)) => {
                tracing::debug!(file = %file.path, local = %local_path.display(), "transfer finished");
                Ok(())
            }
            Ok(Err(reason)) => Err(MonitorError::transfer(&file.path, reason)),
            Err(join_err) => Err(MonitorError::transfer(
                &file.path,
                format!("transfer task failed: {join_err}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_resolves_cache_once_for_repo() {
        let config = HubConfig::default().with_cache_dir("/tmp/test-hub-cache");
        let repo = RepoRef::new("coqui", "XTTS-v2");
        let adapter = HubTransfer::new(&repo, "main", &config);

        assert_eq!(adapter.cache_dir(), std::path::Path::new("/tmp/test-hub-cache"));
        assert_eq!(adapter.repo_id, "coqui/XTTS-v2");
        assert_eq!(adapter.revision, "main");
    }
}
