//! # Index Encoding
//!
//! Turns an ordered sequence of `(relative path, size)` pairs into an index
//! blob. Entries are written in the order supplied; nothing is sorted or
//! deduplicated.
//!
//! Paths must already use `/` separators and must not start with `/`. These
//! are caller obligations and are not checked here.

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use crate::index::layout::{
    ENTRY_NAME_OFFSET_FIELD, ENTRY_SIZE, ENTRY_SIZE_FIELD, HEADER_SIZE, NAME_PREFIX,
    NAME_TERMINATOR,
};
use crate::index::types::models::{EntryRecord, IndexEntry};

/// Incremental builder for an index blob.
///
/// The entry table and the name pool grow in separate buffers and are joined
/// behind the count header by [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct IndexEncoder {
    table: Vec<u8>,
    names: Vec<u8>,
    count: u64,
}

impl IndexEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one file and returns the record written for it.
    pub fn push(&mut self, path: impl AsRef<[u8]>, size: u64) -> EntryRecord {
        let path = path.as_ref();
        let record = EntryRecord {
            size,
            name_offset: self.names.len() as u64,
        };

        self.names.reserve(path.len() + 2);
        self.names.push(NAME_PREFIX);
        self.names.extend_from_slice(path);
        self.names.push(NAME_TERMINATOR);

        let mut row = [0u8; ENTRY_SIZE];
        LittleEndian::write_u64(&mut row[ENTRY_SIZE_FIELD..ENTRY_NAME_OFFSET_FIELD], record.size);
        LittleEndian::write_u64(&mut row[ENTRY_NAME_OFFSET_FIELD..], record.name_offset);
        self.table.extend_from_slice(&row);

        trace!(
            "Entry {}: size={} name_offset={} path=/{}",
            self.count,
            record.size,
            record.name_offset,
            String::from_utf8_lossy(path)
        );
        self.count += 1;
        record
    }

    /// Number of entries pushed so far.
    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Writes the count header and concatenates header, table and name pool.
    pub fn finish(self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(HEADER_SIZE + self.table.len() + self.names.len());
        blob.resize(HEADER_SIZE, 0);
        LittleEndian::write_u64(&mut blob[..HEADER_SIZE], self.count);
        blob.extend_from_slice(&self.table);
        blob.extend_from_slice(&self.names);

        debug!(
            "Encoded index: {} entries, table {} bytes, name pool {} bytes, total {} bytes",
            self.count,
            self.table.len(),
            self.names.len(),
            blob.len()
        );
        blob
    }
}

impl Extend<IndexEntry> for IndexEncoder {
    fn extend<I: IntoIterator<Item = IndexEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.push(&entry.name, entry.size);
        }
    }
}

/// Encodes `entries` into a complete index blob.
pub fn encode<I, E>(entries: I) -> Vec<u8>
where
    I: IntoIterator<Item = E>,
    E: Into<IndexEntry>,
{
    let mut encoder = IndexEncoder::new();
    encoder.extend(entries.into_iter().map(Into::into));
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::layout;

    #[test]
    fn empty_index_is_zero_count_header() {
        let blob = encode(Vec::<IndexEntry>::new());
        assert_eq!(blob, vec![0u8; 8]);
    }

    #[test]
    fn two_entries_have_expected_bytes() {
        let blob = encode([("a.txt", 5u64), ("sub/b.bin", 1024)]);
        assert_eq!(blob.len(), 60);
        assert_eq!(LittleEndian::read_u64(&blob[0..8]), 2);

        // Entry 0
        assert_eq!(LittleEndian::read_u64(&blob[8..16]), 5);
        assert_eq!(LittleEndian::read_u64(&blob[16..24]), 0);
        // Entry 1: name pool offset after "/a.txt\0"
        assert_eq!(LittleEndian::read_u64(&blob[24..32]), 1024);
        assert_eq!(LittleEndian::read_u64(&blob[32..40]), 7);

        assert_eq!(&blob[40..], b"/a.txt\0/sub/b.bin\0");
    }

    #[test]
    fn push_reports_pool_offsets() {
        let mut encoder = IndexEncoder::new();
        assert!(encoder.is_empty());
        let first = encoder.push("x", 1);
        let second = encoder.push("yz", 2);
        assert_eq!(first.name_offset, 0);
        assert_eq!(second.name_offset, 3);
        assert_eq!(encoder.len(), 2);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let blob = encode([("same", 1u64), ("same", 2), ("other", 3), ("same", 4)]);
        let start = layout::name_table_start(4).unwrap();
        assert_eq!(&blob[start..], b"/same\0/same\0/other\0/same\0");
        assert_eq!(LittleEndian::read_u64(&blob[8..16]), 1);
        assert_eq!(LittleEndian::read_u64(&blob[56..64]), 4);
    }

    #[test]
    fn non_utf8_names_are_stored_verbatim() {
        let blob = encode([(&b"bad\xffname"[..], 9u64)]);
        let start = layout::name_table_start(1).unwrap();
        assert_eq!(&blob[start..], b"/bad\xffname\0");
    }

    #[test]
    fn length_matches_layout_formula() {
        let names = ["one", "two/three", "", "deep/er/path.ext"];
        let blob = encode(names.iter().map(|n| (*n, 0u64)));
        assert_eq!(blob.len(), layout::encoded_len(names));
    }
}
