//! Release folder selection
//!
//! Firmware archives hold one folder per build, named with a date token in front
//! of a hyphen (`2020Jan15-GCC49/`). The newest dated folder is the extraction root.

use crate::archive::ArchiveEntry;
use crate::error::ArchiveError;
use chrono::NaiveDate;

/// `chrono` format of a date token: 4-digit year, 3-letter month, 2-digit day
const DATE_TOKEN_FORMAT: &str = "%Y%b%d";

/// A directory entry paired with the first release date found in its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedFolder<'a> {
    /// The directory entry
    pub entry: &'a ArchiveEntry,
    /// Date parsed from the first path segment that carries one
    pub date: Option<NaiveDate>,
}

/// Parse a single path segment such as `2020Jan15-GCC49`
///
/// Returns `None` unless the segment has a hyphen and the text before the first
/// hyphen is exactly a `yyyyMMMdd` date. Month names are matched case-insensitively.
pub fn parse_date_token(segment: &str) -> Option<NaiveDate> {
    let (token, _) = segment.split_once('-')?;
    if !is_date_token_shape(token) {
        return None;
    }
    NaiveDate::parse_from_str(token, DATE_TOKEN_FORMAT).ok()
}

// chrono accepts signed and short years and single-digit days, so the exact
// shape is checked first.
fn is_date_token_shape(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 9
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4..7].iter().all(u8::is_ascii_alphabetic)
        && bytes[7..].iter().all(u8::is_ascii_digit)
}

/// First date found walking the `/`-separated segments of `path` in order
pub fn first_dated_segment(path: &str) -> Option<NaiveDate> {
    path.split('/').find_map(parse_date_token)
}

/// Pair every directory entry with its release date, in archive order
pub fn dated_folders(entries: &[ArchiveEntry]) -> Vec<DatedFolder<'_>> {
    entries
        .iter()
        .filter(|e| e.is_dir())
        .map(|entry| DatedFolder {
            entry,
            date: first_dated_segment(entry.name()),
        })
        .collect()
}

/// Choose the directory entry with the most recent release date
///
/// Undated directories rank below every dated one and ties keep archive order.
/// An archive whose directories carry no date at all has no release to extract
/// and yields [`ArchiveError::NoReleaseFolder`].
pub fn select_release_root(entries: &[ArchiveEntry]) -> Result<&ArchiveEntry, ArchiveError> {
    let mut candidates = dated_folders(entries);
    let directories = candidates.len();

    // Stable sort: equal dates stay in enumeration order. `None < Some(_)`.
    candidates.sort_by(|a, b| b.date.cmp(&a.date));

    match candidates.first() {
        Some(DatedFolder {
            entry,
            date: Some(_),
        }) => Ok(*entry),
        _ => Err(ArchiveError::NoReleaseFolder { directories }),
    }
}
