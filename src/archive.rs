//! In-memory view over a downloaded zip archive

use crate::error::ArchiveError;
use std::io::{Cursor, Read};
use std::path::{Component, PathBuf};
use tracing::debug;

/// Upper bound on the buffer reserved up front for one entry
const MAX_PREALLOCATION: u64 = 1 << 20;

/// One named entry inside a [`FirmwareArchive`]
///
/// Names keep the archive's forward-slash separators; directory entries end with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    index: usize,
    name: String,
}

impl ArchiveEntry {
    /// Create an entry for the given position and full name
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// Position of the entry in the archive's central directory
    pub fn index(&self) -> usize {
        self.index
    }

    /// Full path of the entry inside the archive
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the entry denotes a directory
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Host-native path of this entry relative to `root`
    ///
    /// Returns `None` when the entry is not under `root`, when nothing remains
    /// after stripping the prefix, or when the remainder would escape the
    /// directory it is joined onto (`..`, roots, drive prefixes).
    pub fn relative_to(&self, root: &ArchiveEntry) -> Option<PathBuf> {
        let rest = self.name.strip_prefix(root.name())?;

        let mut relative = PathBuf::new();
        for segment in rest.split('/').filter(|s| !s.is_empty()) {
            relative.push(segment);
        }

        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.as_os_str().is_empty() || !safe {
            return None;
        }
        Some(relative)
    }
}

/// A zip container fully buffered in memory
pub struct FirmwareArchive {
    zip: zip::ZipArchive<Cursor<Vec<u8>>>,
    entries: Vec<ArchiveEntry>,
}

impl FirmwareArchive {
    /// Open the archive and list its entries in central-directory order
    pub fn open(bytes: Vec<u8>) -> Result<Self, ArchiveError> {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut entries = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let file = zip.by_index(index)?;
            entries.push(ArchiveEntry::new(index, file.name()));
        }

        debug!(entry_count = entries.len(), "opened zip archive");

        Ok(Self { zip, entries })
    }

    /// All entries, files and directories, in archive order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// File entries whose full path starts with `root`'s full path
    pub fn files_under<'a>(
        &'a self,
        root: &'a ArchiveEntry,
    ) -> impl Iterator<Item = &'a ArchiveEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.name.starts_with(root.name()) && !e.is_dir())
    }

    /// Decompress the full content of a file entry
    pub fn read(&mut self, entry: &ArchiveEntry) -> Result<Vec<u8>, ArchiveError> {
        let unreadable = |reason: String| ArchiveError::EntryUnreadable {
            entry: entry.name.clone(),
            reason,
        };

        let mut file = self
            .zip
            .by_index(entry.index)
            .map_err(|e| unreadable(e.to_string()))?;

        // The declared size comes from the archive and may be arbitrarily large
        let declared = file.size();
        let mut content = Vec::with_capacity(declared.min(MAX_PREALLOCATION) as usize);
        file.read_to_end(&mut content)
            .map_err(|e| unreadable(e.to_string()))?;

        if content.len() as u64 != declared {
            return Err(unreadable(format!(
                "declared size is {declared} bytes but {} bytes were read",
                content.len()
            )));
        }
        Ok(content)
    }
}
