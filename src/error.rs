//! Error types for uefi-fetch
//!
//! The library surfaces every failure to the invoking orchestrator without
//! catching or retrying it. Failures are grouped by the step that produced them:
//! - Fetching the remote archive ([`FetchError`], [`Error::Network`])
//! - Reading the zip container and choosing a release folder ([`ArchiveError`])
//! - Writing files to disk ([`Error::Io`])
//! - Invalid configuration ([`Error::Config`])

use thiserror::Error;

/// Result type alias for uefi-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for uefi-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "destination")
        key: Option<String>,
    },

    /// Remote fetch failed before any bytes were received
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Zip container could not be read or holds no usable release
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Errors raised while resolving or requesting the remote archive
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as given
        url: String,
        /// Why parsing failed
        reason: String,
    },

    /// The server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that was requested
        url: String,
        /// The HTTP status code returned
        status: u16,
    },
}

/// Errors raised while reading the downloaded zip container
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The fetched bytes are not a valid zip container
    #[error("malformed zip archive: {reason}")]
    Malformed {
        /// Reason reported by the zip reader
        reason: String,
    },

    /// A single entry could not be opened or decompressed
    #[error("failed to read archive entry {entry}: {reason}")]
    EntryUnreadable {
        /// Full path of the entry inside the archive
        entry: String,
        /// Reason reported by the zip reader
        reason: String,
    },

    /// No directory entry carries a parseable release date
    #[error("no release folder found among {directories} directory entries")]
    NoReleaseFolder {
        /// Number of directory entries that were inspected
        directories: usize,
    },
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(e: zip::result::ZipError) -> Self {
        ArchiveError::Malformed {
            reason: e.to_string(),
        }
    }
}
