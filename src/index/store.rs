//! Reading and writing index files.
//!
//! [`IndexFile`] owns a blob loaded from disk; [`build_index`] runs a full
//! scan, encode and write for a directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::format::decoder::{self, IndexDecoder};
use super::format::encoder;
use super::iter::EntryIterator;
use super::scan;
use super::types::error::Result;
use super::types::models::DecodedEntry;

/// An index blob loaded from disk.
///
/// The header and entry table are validated on open; names are resolved
/// when entries are requested.
#[derive(Debug)]
pub struct IndexFile {
    path: PathBuf,
    data: Vec<u8>,
    file_count: u64,
}

impl IndexFile {
    /// Reads and validates the index at `path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the file cannot be read
    /// - the header is truncated or the entry table does not fit the file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening index file: {}", path.display());
        let data = read_index(path)?;
        let file_count = IndexDecoder::new(&data)?.file_count();

        Ok(Self {
            path: path.to_path_buf(),
            data,
            file_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of entries declared in the header. O(1).
    pub fn file_count(&self) -> u64 {
        self.file_count
    }

    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// Lazy iterator over all entries.
    pub fn iter_entries(&self) -> Result<EntryIterator<'_>> {
        decoder::decode(&self.data)
    }

    /// All entries, or the first inconsistency found.
    pub fn entries(&self) -> Result<Vec<DecodedEntry<'_>>> {
        decoder::decode_all(&self.data)
    }
}

/// Reads a whole index file into memory.
pub fn read_index(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Writes `blob` to `path`, replacing any existing file.
pub fn write_index(path: impl AsRef<Path>, blob: &[u8]) -> Result<()> {
    Ok(fs::write(path, blob)?)
}

/// Scans `root`, encodes the result and writes it to `output`.
///
/// If `output` lies inside `root` it is not listed in the new index.
/// Returns the number of entries written.
pub fn build_index(root: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<u64> {
    let root = root.as_ref();
    let output = output.as_ref();

    let entries = scan::scan_excluding(root, Some(output))?;
    let count = entries.len() as u64;
    let blob = encoder::encode(entries);
    write_index(output, &blob)?;

    info!(
        "Wrote index {} ({} entries, {} bytes)",
        output.display(),
        count,
        blob.len()
    );
    Ok(count)
}
