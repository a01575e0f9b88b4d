//! The UEFI download deployment task
//!
//! Downloads the firmware repository archive, picks the newest dated release
//! folder inside it and extracts that folder's files to the destination.
//! The work is skipped when the destination already exists.
//!
//! Files are first written to a sibling staging directory which is renamed onto
//! the destination once every entry has been written, so an interrupted run never
//! leaves a half-filled destination behind.

use crate::archive::{ArchiveEntry, FirmwareArchive};
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{ContentFetcher, GitHubClient};
use crate::fs_ops::{FileSystemOperations, LocalFileSystem};
use crate::release::select_release_root;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// A single step run by a deployment orchestrator
#[async_trait]
pub trait DeploymentTask: Send + Sync {
    /// Human-readable description shown while the task runs
    fn description(&self) -> &'static str;

    /// Run the task to completion
    async fn execute(&self) -> Result<()>;
}

/// What a run of [`UefiDownload`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// The destination already existed; nothing was fetched
    Skipped {
        /// The existing destination directory
        destination: PathBuf,
    },
    /// The newest release folder was extracted
    Extracted {
        /// Full archive path of the selected release folder
        root: String,
        /// Output paths under the destination, in archive order
        files: Vec<PathBuf>,
    },
}

/// Deployment task that fetches the newest dated UEFI release
pub struct UefiDownload<F = GitHubClient, S = LocalFileSystem> {
    fetcher: F,
    fs: S,
    config: Config,
}

impl UefiDownload<GitHubClient, LocalFileSystem> {
    /// Build the task with a [`GitHubClient`] and the local file system
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = GitHubClient::from_config(&config)?;
        Ok(Self::with_config(fetcher, LocalFileSystem, config))
    }
}

impl<F, S> UefiDownload<F, S>
where
    F: ContentFetcher,
    S: FileSystemOperations,
{
    /// Create the task with the default source and destination
    pub fn new(fetcher: F, fs: S) -> Self {
        Self::with_config(fetcher, fs, Config::default())
    }

    /// Create the task with an explicit configuration
    pub fn with_config(fetcher: F, fs: S, config: Config) -> Self {
        Self {
            fetcher,
            fs,
            config,
        }
    }

    /// The configuration this task runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the task and report what it did
    pub async fn run(&self) -> Result<ExtractionOutcome> {
        self.config.validate()?;
        let destination = &self.config.destination;

        if self.fs.directory_exists(destination).await {
            info!(?destination, "destination already exists, skipping UEFI download");
            return Ok(ExtractionOutcome::Skipped {
                destination: destination.clone(),
            });
        }

        let bytes = self.fetcher.open(&self.config.source_url).await?;
        let mut archive = FirmwareArchive::open(bytes)?;

        let root = select_release_root(archive.entries())?.clone();
        let entries: Vec<ArchiveEntry> = archive.files_under(&root).cloned().collect();
        info!(
            root = root.name(),
            file_count = entries.len(),
            "selected most recent release folder"
        );

        let staging = self.config.staging_dir();
        if self.fs.directory_exists(&staging).await {
            warn!(?staging, "removing staging directory left by an earlier run");
            self.fs.remove_directory(&staging).await?;
        } else if self.fs.path_exists(&staging).await {
            warn!(?staging, "removing file occupying the staging path");
            self.fs.remove_file(&staging).await?;
        }
        self.fs.create_directory(&staging).await?;

        let mut files = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Some(relative) = entry.relative_to(&root) else {
                warn!(entry = entry.name(), "skipping entry with unsafe path");
                continue;
            };

            let content = archive.read(entry)?;
            self.write_file(&staging.join(&relative), &content).await?;
            debug!(entry = entry.name(), bytes = content.len(), "extracted");

            files.push(destination.join(relative));
        }

        self.fs.rename(&staging, destination).await?;

        info!(
            ?destination,
            extracted_count = files.len(),
            "UEFI extraction complete"
        );

        Ok(ExtractionOutcome::Extracted {
            root: root.name().to_string(),
            files,
        })
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !self.fs.directory_exists(parent).await {
                self.fs.create_directory(parent).await?;
            }
        }

        let with_path = |e: std::io::Error| {
            std::io::Error::new(
                e.kind(),
                format!("failed to write '{}': {}", path.display(), e),
            )
        };

        let mut file = tokio::fs::File::create(path).await.map_err(with_path)?;
        file.write_all(content).await.map_err(with_path)?;
        file.flush().await.map_err(with_path)?;
        Ok(())
    }
}

#[async_trait]
impl<F, S> DeploymentTask for UefiDownload<F, S>
where
    F: ContentFetcher,
    S: FileSystemOperations,
{
    fn description(&self) -> &'static str {
        "Downloading UEFI"
    }

    async fn execute(&self) -> Result<()> {
        self.run().await.map(|_| ())
    }
}
