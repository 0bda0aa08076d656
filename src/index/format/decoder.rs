//! # Index Decoding
//!
//! Validates an index blob and resolves its entries. Construction checks the
//! header and that the whole entry table fits in the buffer; names are then
//! resolved per entry, each one bounds-checked against the buffer end.

use log::{debug, info};

use crate::index::iter::EntryIterator;
use crate::index::layout::{self, ENTRY_NAME_OFFSET_FIELD, ENTRY_SIZE_FIELD, HEADER_SIZE};
use crate::index::types::error::{IndexError, Result};
use crate::index::types::models::{DecodedEntry, EntryRecord};
use crate::index::utils;

/// A validated, read-only view over an index blob.
#[derive(Debug, Clone, Copy)]
pub struct IndexDecoder<'a> {
    buf: &'a [u8],
    file_count: u64,
    name_table_start: usize,
}

impl<'a> IndexDecoder<'a> {
    /// Validates the header and entry table of `buf`.
    ///
    /// # Errors
    /// Returns [`IndexError::MalformedIndex`] if:
    /// - the buffer is shorter than the 8-byte header
    /// - the declared entry table does not fit in the buffer
    pub fn new(buf: &'a [u8]) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(IndexError::MalformedIndex(format!(
                "truncated header: {} bytes, need {}",
                buf.len(),
                HEADER_SIZE
            )));
        }

        let file_count = utils::read_u64_at(buf, 0)?;
        let name_table_start = layout::name_table_start(file_count)
            .filter(|&start| start <= buf.len())
            .ok_or_else(|| {
                IndexError::MalformedIndex(format!(
                    "truncated entry table: {} entries declared, buffer is {} bytes",
                    file_count,
                    buf.len()
                ))
            })?;

        debug!(
            "Index layout: {} entries, name table at {}, {} bytes total",
            file_count,
            name_table_start,
            buf.len()
        );

        Ok(Self {
            buf,
            file_count,
            name_table_start,
        })
    }

    /// Number of entries declared in the header.
    pub fn file_count(&self) -> u64 {
        self.file_count
    }

    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// Absolute offset of the name table.
    pub fn name_table_start(&self) -> usize {
        self.name_table_start
    }

    /// Reads the raw table row for `ordinal`.
    pub fn record(&self, ordinal: u64) -> Result<EntryRecord> {
        if ordinal >= self.file_count {
            return Err(IndexError::MalformedIndex(format!(
                "entry {} out of range for {} entries",
                ordinal, self.file_count
            )));
        }
        let offset = layout::entry_offset(ordinal).ok_or_else(|| {
            IndexError::MalformedIndex(format!("entry {} offset overflows", ordinal))
        })?;
        Ok(EntryRecord {
            size: utils::read_u64_at(self.buf, offset + ENTRY_SIZE_FIELD)?,
            name_offset: utils::read_u64_at(self.buf, offset + ENTRY_NAME_OFFSET_FIELD)?,
        })
    }

    /// Resolves entry `ordinal`, including its name.
    pub fn entry(&self, ordinal: u64) -> Result<DecodedEntry<'a>> {
        let record = self.record(ordinal)?;
        let name_start = usize::try_from(record.name_offset)
            .ok()
            .and_then(|offset| self.name_table_start.checked_add(offset))
            .ok_or_else(|| {
                IndexError::MalformedIndex(format!(
                    "entry {}: name offset {} out of range",
                    ordinal, record.name_offset
                ))
            })?;
        let raw_name = utils::read_cstring_at(self.buf, name_start).map_err(|e| {
            IndexError::MalformedIndex(format!("entry {}: {}", ordinal, malformed_reason(e)))
        })?;

        Ok(DecodedEntry {
            ordinal,
            size: record.size,
            raw_name,
        })
    }

    /// Lazily yields every entry in table order.
    pub fn iter(&self) -> EntryIterator<'a> {
        EntryIterator::new(*self)
    }
}

impl<'a> IntoIterator for IndexDecoder<'a> {
    type Item = Result<DecodedEntry<'a>>;
    type IntoIter = EntryIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        EntryIterator::new(self)
    }
}

fn malformed_reason(err: IndexError) -> String {
    match err {
        IndexError::MalformedIndex(reason) => reason,
        other => other.to_string(),
    }
}

/// Validates `buf` and returns a lazy sequence over its entries.
pub fn decode(buf: &[u8]) -> Result<EntryIterator<'_>> {
    let decoder = IndexDecoder::new(buf)?;
    info!("Decoding index with {} entries", decoder.file_count());
    Ok(decoder.iter())
}

/// Decodes every entry, failing as a whole on the first inconsistency.
pub fn decode_all(buf: &[u8]) -> Result<Vec<DecodedEntry<'_>>> {
    decode(buf)?.collect()
}
