//! Configuration types for uefi-fetch
//!
//! Every field defaults to the fixed values the deployment task has always used,
//! so `Config::default()` is the production configuration. Overrides exist for
//! embedding and tests; nothing varies per invocation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Repository whose source archive holds the dated UEFI releases
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/andreiw/RaspberryPiPkg";

/// Configuration for [`UefiDownload`](crate::UefiDownload)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Repository or archive URL (default: the RaspberryPiPkg repository)
    ///
    /// A bare GitHub repository URL is resolved to its branch archive by
    /// [`GitHubClient`](crate::GitHubClient); any other URL is fetched as-is.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Branch whose archive is downloaded for repository URLs (default: "master")
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Extraction destination (default: "Downloaded/UEFI", relative to the working directory)
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// HTTP request timeout in seconds (default: 300)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            branch: default_branch(),
            destination: default_destination(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Config {
    /// HTTP request timeout as a [`Duration`]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Sibling directory extraction writes into before the final rename
    ///
    /// `Downloaded/UEFI` stages into `Downloaded/UEFI.partial`.
    pub fn staging_dir(&self) -> PathBuf {
        let mut name = self
            .destination
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".partial");
        self.destination.with_file_name(name)
    }

    /// Check the configuration for values the task cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.source_url.trim().is_empty() {
            return Err(config_error("source_url must not be empty", "source_url"));
        }
        if let Err(e) = url::Url::parse(&self.source_url) {
            return Err(config_error(
                format!("source_url '{}' is not a valid URL: {}", self.source_url, e),
                "source_url",
            ));
        }
        if self.branch.trim().is_empty() {
            return Err(config_error("branch must not be empty", "branch"));
        }
        if self.destination.as_os_str().is_empty() || self.destination.file_name().is_none() {
            return Err(config_error(
                "destination must name a directory",
                "destination",
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(config_error(
                "fetch_timeout_secs must be greater than zero",
                "fetch_timeout_secs",
            ));
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>, key: &str) -> Error {
    Error::Config {
        message: message.into(),
        key: Some(key.to_string()),
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_destination() -> PathBuf {
    // Joined component-wise so the host separator is used.
    PathBuf::from("Downloaded").join("UEFI")
}

fn default_fetch_timeout_secs() -> u64 {
    300
}
