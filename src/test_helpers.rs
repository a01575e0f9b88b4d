//! Shared test helpers for building archives and fake collaborators.

use crate::error::{FetchError, Result};
use crate::fetch::ContentFetcher;
use async_trait::async_trait;
use std::io::{Cursor, Write};
use std::sync::Mutex;

/// Build a zip in memory; names ending with `/` become directory entries.
/// Entries are stored uncompressed so their bytes can be located in the output.
pub(crate) fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Flip the first occurrence of `needle` in `bytes` so its CRC no longer matches
pub(crate) fn corrupt(bytes: &mut [u8], needle: &[u8]) {
    let start = bytes
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("needle not found in archive");
    for b in &mut bytes[start..start + needle.len()] {
        *b ^= 0xFF;
    }
}

fn u16_at(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes(bytes[at..at + 2].try_into().unwrap())
}

fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
}

fn end_of_central_directory(bytes: &[u8]) -> usize {
    bytes
        .windows(4)
        .rposition(|w| w == 0x0605_4b50u32.to_le_bytes())
        .expect("end of central directory not found")
}

/// Rewrite the central directory record of `name` so it declares `size`
/// uncompressed bytes through a zip64 extra field; the entry data is untouched.
pub(crate) fn declare_uncompressed_size(bytes: &mut Vec<u8>, name: &str, size: u64) {
    let eocd = end_of_central_directory(bytes);
    let mut header = u32_at(bytes, eocd + 16) as usize;

    loop {
        assert_eq!(u32_at(bytes, header), 0x0201_4b50, "{name} not in central directory");
        let name_len = u16_at(bytes, header + 28) as usize;
        let extra_len = u16_at(bytes, header + 30) as usize;
        let comment_len = u16_at(bytes, header + 32) as usize;
        if &bytes[header + 46..header + 46 + name_len] == name.as_bytes() {
            bytes[header + 24..header + 28].copy_from_slice(&u32::MAX.to_le_bytes());

            let mut zip64 = vec![0x01, 0x00, 0x08, 0x00];
            zip64.extend_from_slice(&size.to_le_bytes());
            let at = header + 46 + name_len + extra_len;
            bytes.splice(at..at, zip64.iter().copied());

            let new_extra_len = (extra_len + zip64.len()) as u16;
            bytes[header + 30..header + 32].copy_from_slice(&new_extra_len.to_le_bytes());

            let eocd = end_of_central_directory(bytes);
            let dir_size = u32_at(bytes, eocd + 12) + zip64.len() as u32;
            bytes[eocd + 12..eocd + 16].copy_from_slice(&dir_size.to_le_bytes());
            return;
        }
        header += 46 + name_len + extra_len + comment_len;
    }
}

/// Fetcher returning a fixed body (or a 404) and recording requested URLs
pub(crate) struct StaticFetcher {
    body: Option<Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub(crate) fn serving(body: Vec<u8>) -> Self {
        Self {
            body: Some(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn not_found() -> Self {
        Self {
            body: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn open(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        match &self.body {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }
            .into()),
        }
    }
}
