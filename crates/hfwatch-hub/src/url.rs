//! URL construction helpers for the Hub API.
//!
//! Pure functions building the endpoints the client uses, keeping URL
//! construction consistent and testable.

use url::Url;

use crate::config::{HubConfig, RepoRef};

/// Build a URL for the recursive repository tree endpoint.
///
/// The revision is percent-encoded so branch names containing `/` stay a
/// single path segment.
pub fn build_tree_url(config: &HubConfig, repo: &RepoRef, revision: &str) -> Url {
    let mut url = config.base_url.clone();

    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!(
        "{base_path}/{}/tree/{}",
        repo.id(),
        urlencoding::encode(revision)
    ));
    url.set_query(Some("recursive=true"));

    url
}

/// Build a URL for the repository info endpoint.
pub fn build_repo_info_url(config: &HubConfig, repo: &RepoRef) -> Url {
    let mut url = config.base_url.clone();

    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{}", repo.id()));

    url
}
