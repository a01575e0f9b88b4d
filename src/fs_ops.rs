//! File-system capability used by the deployment task

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Directory operations the deployment task depends on
///
/// File contents are written directly through tokio file handles; this trait
/// covers the directory-level decisions so they can be observed in tests.
#[async_trait]
pub trait FileSystemOperations: Send + Sync {
    /// Whether a directory exists at `path`
    async fn directory_exists(&self, path: &Path) -> bool;

    /// Whether anything (file, directory or link) exists at `path`
    async fn path_exists(&self, path: &Path) -> bool;

    /// Create the directory at `path`, including missing ancestors
    async fn create_directory(&self, path: &Path) -> Result<()>;

    /// Remove the directory at `path` and everything under it
    async fn remove_directory(&self, path: &Path) -> Result<()>;

    /// Remove the file at `path`
    async fn remove_file(&self, path: &Path) -> Result<()>;

    /// Rename `from` to `to`
    async fn rename(&self, from: &Path, to: &Path) -> Result<()>;
}

/// [`FileSystemOperations`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystemOperations for LocalFileSystem {
    async fn directory_exists(&self, path: &Path) -> bool {
        match tokio::fs::metadata(path).await {
            Ok(m) => m.is_dir(),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    debug!(?path, error = %e, "could not stat path, treating as missing");
                }
                false
            }
        }
    }

    async fn path_exists(&self, path: &Path) -> bool {
        tokio::fs::symlink_metadata(path).await.is_ok()
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        debug!(?path, "creating directory");
        tokio::fs::create_dir_all(path).await.map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to create directory '{}': {}", path.display(), e),
            )
        })?;
        Ok(())
    }

    async fn remove_directory(&self, path: &Path) -> Result<()> {
        debug!(?path, "removing directory");
        tokio::fs::remove_dir_all(path).await.map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to remove directory '{}': {}", path.display(), e),
            )
        })?;
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        debug!(?path, "removing file");
        tokio::fs::remove_file(path).await.map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to remove file '{}': {}", path.display(), e),
            )
        })?;
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        tokio::fs::rename(from, to).await.map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "failed to rename '{}' to '{}': {}",
                    from.display(),
                    to.display(),
                    e
                ),
            )
        })?;
        Ok(())
    }
}
