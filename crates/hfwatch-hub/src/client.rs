//! Hub client: repository enumeration.

use hfwatch_core::{FileEntry, TransferPlan};
use serde_json::Value;

use crate::config::{HubConfig, RepoRef};
use crate::error::HubResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::parsing::parse_tree_entries;
use crate::url::build_tree_url;

/// Hub client with an injectable HTTP backend.
pub struct HubClient<B: HttpBackend> {
    config: HubConfig,
    backend: B,
}

/// The production client type.
pub type DefaultHubClient = HubClient<ReqwestBackend>;

impl DefaultHubClient {
    /// Create a client backed by reqwest.
    #[must_use]
    pub fn new(config: HubConfig) -> Self {
        let backend = ReqwestBackend::new(&config);
        Self { config, backend }
    }
}

impl<B: HttpBackend> HubClient<B> {
    /// Create a client with a custom HTTP backend.
    pub const fn with_backend(config: HubConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// List all files in a repository at the given revision.
    ///
    /// Follows tree-endpoint pagination; the returned order is the API's
    /// order, which becomes the download order of the plan.
    pub async fn list_repo_files(
        &self,
        repo: &RepoRef,
        revision: &str,
    ) -> HubResult<Vec<FileEntry>> {
        let mut files = Vec::new();
        let mut next = Some(build_tree_url(&self.config, repo, revision));

        while let Some(url) = next.take() {
            tracing::debug!(url = %url, "listing repository tree page");
            let (page, next_url): (Value, _) = self.backend.get_json_with_next(&url).await?;
            files.extend(parse_tree_entries(&page)?);
            next = next_url;
        }

        tracing::debug!(repo = %repo, count = files.len(), "enumerated repository files");
        Ok(files)
    }

    /// Enumerate a repository into a transfer plan.
    pub async fn transfer_plan(&self, repo: &RepoRef, revision: &str) -> HubResult<TransferPlan> {
        let files = self.list_repo_files(repo, revision).await?;
        Ok(TransferPlan::new(files))
    }
}
