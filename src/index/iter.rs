//! Lazy, sequential access to index entries.
//!
//! # Example
//! ```
//! # use dirindex::{decode, encode};
//! let blob = encode([("a.txt", 5u64)]);
//! for entry in decode(&blob).unwrap() {
//!     let entry = entry.unwrap();
//!     println!("{}:{{{},\"{}\"}}", entry.ordinal, entry.size, entry.name());
//! }
//! ```

use std::iter::FusedIterator;

use super::format::decoder::IndexDecoder;
use super::types::error::Result;
use super::types::models::DecodedEntry;

/// Iterator over the entries of an index blob, in table order.
///
/// Yields `Result<DecodedEntry>`. After the first error the iterator is
/// exhausted; later entries are never produced.
///
/// Created by [`IndexDecoder::iter()`](crate::IndexDecoder::iter) or
/// [`decode()`](crate::decode).
#[derive(Debug, Clone)]
pub struct EntryIterator<'a> {
    decoder: IndexDecoder<'a>,
    next_ordinal: u64,
    failed: bool,
}

impl<'a> EntryIterator<'a> {
    pub(crate) fn new(decoder: IndexDecoder<'a>) -> Self {
        Self {
            decoder,
            next_ordinal: 0,
            failed: false,
        }
    }

    /// Entries not yet produced.
    fn remaining(&self) -> u64 {
        if self.failed {
            0
        } else {
            self.decoder.file_count() - self.next_ordinal
        }
    }
}

impl<'a> Iterator for EntryIterator<'a> {
    type Item = Result<DecodedEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }

        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        let result = self.decoder.entry(ordinal);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        // An error cuts the sequence short, so only the upper bound is known.
        (0, usize::try_from(remaining).ok())
    }
}

impl FusedIterator for EntryIterator<'_> {}
