//! Remote content retrieval
//!
//! The deployment task only needs "give me the bytes behind this URL". The
//! [`ContentFetcher`] trait is that seam; [`GitHubClient`] is the HTTP
//! implementation used in production.

use crate::config::Config;
use crate::error::{Error, FetchError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Capability to fetch the content behind a URL
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the full body for `url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the transport fails, or the
    /// server does not answer with a success status.
    async fn open(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP fetcher that understands GitHub repository URLs
///
/// `https://github.com/<owner>/<repo>` is resolved to the source archive of the
/// configured branch. Any other URL is requested unchanged.
pub struct GitHubClient {
    http: reqwest::Client,
    branch: String,
}

impl GitHubClient {
    /// Create a client downloading `branch` archives with the given request timeout
    pub fn new(branch: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            branch: branch.into(),
        })
    }

    /// Create a client from the branch and timeout in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.branch.clone(), config.fetch_timeout())
    }

    /// The URL actually requested for `url`
    pub fn resolve(&self, url: &str) -> Result<Url> {
        resolve_archive_url(url, &self.branch)
    }
}

/// Map a GitHub repository URL onto its branch source archive
///
/// URLs that are not a bare `github.com/<owner>/<repo>` path are returned as
/// parsed, so direct archive or mirror URLs pass straight through.
pub fn resolve_archive_url(url: &str, branch: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let is_github = matches!(parsed.host_str(), Some("github.com" | "www.github.com"));
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if !is_github || segments.len() != 2 {
        return Ok(parsed);
    }

    let owner = segments[0];
    let repo = segments[1].trim_end_matches(".git");
    let archive = format!(
        "{}://{}/{}/{}/archive/refs/heads/{}.zip",
        parsed.scheme(),
        parsed.host_str().unwrap_or("github.com"),
        owner,
        repo,
        branch
    );
    Url::parse(&archive).map_err(|e| {
        Error::from(FetchError::InvalidUrl {
            url: archive.clone(),
            reason: e.to_string(),
        })
    })
}

#[async_trait]
impl ContentFetcher for GitHubClient {
    async fn open(&self, url: &str) -> Result<Vec<u8>> {
        let target = self.resolve(url)?;
        info!(%target, "fetching archive");

        let response = self.http.get(target.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: target.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().await?;
        debug!(%target, bytes = body.len(), "archive downloaded");
        Ok(body.to_vec())
    }
}
