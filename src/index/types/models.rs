//! Data structures representing index format components

use std::borrow::Cow;

/// One file to be recorded in an index.
///
/// `name` is the path relative to the scanned root, using `/` separators and
/// without a leading `/` (the encoder adds it). It is kept as raw bytes so
/// file names that are not valid UTF-8 are stored unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: Vec<u8>,
    pub size: u64,
}

impl IndexEntry {
    pub fn new(name: impl Into<Vec<u8>>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// The name as text, for display and logging only.
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

impl<S: Into<Vec<u8>>> From<(S, u64)> for IndexEntry {
    fn from((name, size): (S, u64)) -> Self {
        Self::new(name, size)
    }
}

/// A single fixed-size row of the entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRecord {
    pub size: u64,
    /// Byte offset relative to the start of the name table.
    pub name_offset: u64,
}

/// An entry resolved from an index blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry<'a> {
    /// Zero-based position in the entry table.
    pub ordinal: u64,
    pub size: u64,
    /// Name bytes exactly as stored, leading `/` included, terminator excluded.
    pub raw_name: &'a [u8],
}

impl<'a> DecodedEntry<'a> {
    /// The stored name as text. Invalid UTF-8 is replaced, not rejected.
    pub fn name(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.raw_name)
    }
}
