//! Public configuration and repository references for the Hub adapter.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Configuration for the Hub client and transfer adapter.
///
/// Use the builder pattern methods to customize.
///
/// # Example
///
/// ```
/// use hfwatch_hub::HubConfig;
/// use std::time::Duration;
///
/// let config = HubConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_token("hf_...");
/// ```
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Base URL for the Hub model API.
    pub base_url: Url,
    /// User agent string for HTTP requests.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Optional authentication token for private repositories.
    pub token: Option<String>,
    /// Maximum number of retry attempts for transient errors.
    pub max_retries: u8,
    /// Base delay for exponential backoff between retries.
    pub retry_base_delay: Duration,
    /// Cache directory override; resolved from the environment when `None`.
    pub cache_dir: Option<PathBuf>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://huggingface.co/api/models")
                .expect("default Hub API URL is valid"),
            user_agent: concat!("hfwatch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            token: None,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            cache_dir: None,
        }
    }
}

impl HubConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the Hub model API.
    ///
    /// Defaults to `https://huggingface.co/api/models`.
    #[must_use]
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = url;
        self
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the authentication token for private repositories.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the cache directory, overriding environment resolution.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }
}

/// Reference to a Hub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Create a new repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a repository reference from an `owner/name` id string.
    #[must_use]
    pub fn parse(repo_id: &str) -> Option<Self> {
        let parts: Vec<&str> = repo_id.splitn(2, '/').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            Some(Self {
                owner: parts[0].to_string(),
                name: parts[1].to_string(),
            })
        } else {
            None
        }
    }

    /// Get the full repository id (`owner/name`).
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
