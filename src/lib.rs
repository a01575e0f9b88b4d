//! # uefi-fetch
//!
//! Deployment task that installs the newest Raspberry Pi UEFI firmware build.
//!
//! The firmware repository ships every build as a dated folder
//! (`2019Jan25-GCC49/`) inside its source archive. [`UefiDownload`] downloads that
//! archive, picks the folder with the most recent date and extracts its files to
//! `Downloaded/UEFI`. When the destination already exists the task does nothing,
//! so it can be run on every deployment.
//!
//! ## Quick Start
//!
//! ```no_run
//! use uefi_fetch::{Config, DeploymentTask, UefiDownload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let task = UefiDownload::from_config(Config::default())?;
//!     println!("{}", task.description());
//!     task.execute().await?;
//!     Ok(())
//! }
//! ```
//!
//! Both collaborators are injected: any [`ContentFetcher`] and
//! [`FileSystemOperations`] implementation can stand in for the GitHub client and
//! the local disk.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Zip archive view
pub mod archive;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Remote content retrieval
pub mod fetch;
/// File-system capability
pub mod fs_ops;
/// Release folder selection
pub mod release;
/// The deployment task
pub mod task;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use archive::{ArchiveEntry, FirmwareArchive};
pub use config::Config;
pub use error::{ArchiveError, Error, FetchError, Result};
pub use fetch::{ContentFetcher, GitHubClient};
pub use fs_ops::{FileSystemOperations, LocalFileSystem};
pub use release::select_release_root;
pub use task::{DeploymentTask, ExtractionOutcome, UefiDownload};
