//! HTTP backend abstraction for the Hub API.
//!
//! Trait-based backend allowing dependency injection and easy testing. The
//! production implementation uses reqwest with automatic retry for transient
//! errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::HubConfig;
use crate::error::{HubError, HubResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can fetch JSON from URLs.
///
/// This is an implementation detail - external code goes through
/// [`crate::HubClient`].
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HubResult<T>;

    /// Fetch JSON from a URL, returning the next page URL when the response
    /// is paginated via a `Link: <...>; rel="next"` header.
    async fn get_json_with_next<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
    ) -> HubResult<(T, Option<Url>)>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// Implements exponential backoff for transient server errors (5xx) and
/// network errors; 4xx responses fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend from the given configuration.
    pub fn new(config: &HubConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
            auth_token: config.token.clone(),
        }
    }

    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.as_str());
        if let Some(ref token) = self.auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> HubResult<reqwest::Response> {
        let mut last_error: Option<HubError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                tracing::debug!(url = %url, attempt, delay_ms = delay.as_millis() as u64, "retrying Hub request");
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(HubError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    // 404 is a special case
                    if status.as_u16() == 404 {
                        if let Some(repo_id) = extract_repo_id_from_path(url.path()) {
                            return Err(HubError::RepoNotFound { repo_id });
                        }
                    }

                    // 4xx errors or final attempt - fail immediately
                    return Err(HubError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HubError::InvalidResponse {
            message: "unknown error during fetch".to_string(),
        }))
    }
}

/// Try to extract a repository id from an API path.
fn extract_repo_id_from_path(path: &str) -> Option<String> {
    let path = path.trim_start_matches('/');
    if let Some(rest) = path.strip_prefix("api/models/") {
        let parts: Vec<&str> = rest.splitn(3, '/').collect();
        if parts.len() >= 2 && !parts[1].is_empty() {
            return Some(format!("{}/{}", parts[0], parts[1]));
        }
    }
    None
}

/// Parse the next page URL out of a `Link` header value.
fn parse_next_link(link: &str) -> Option<Url> {
    for part in link.split(',') {
        let part = part.trim();
        if !part.contains("rel=\"next\"") {
            continue;
        }
        let start = part.find('<')?;
        let end = part.find('>')?;
        return Url::parse(&part[start + 1..end]).ok();
    }
    None
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HubResult<T> {
        let response = self.fetch_with_retry(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn get_json_with_next<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
    ) -> HubResult<(T, Option<Url>)> {
        let response = self.fetch_with_retry(url).await?;

        let next = response
            .headers()
            .get("Link")
            .and_then(|h| h.to_str().ok())
            .and_then(parse_next_link);

        let data: T = response.json().await?;
        Ok((data, next))
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
