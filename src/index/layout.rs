//! On-disk layout of an index blob.
//!
//! ```text
//! ┌──────────────────────────┐ 0
//! │  u64 file_count (LE)     │
//! ├──────────────────────────┤ HEADER_SIZE
//! │  file_count × {          │
//! │    u64 size        (LE)  │
//! │    u64 name_offset (LE)  │
//! │  }                       │
//! ├──────────────────────────┤ name_table_start(file_count)
//! │  "/name\0" "/name\0" ... │
//! └──────────────────────────┘
//! ```
//!
//! `name_offset` is relative to the start of the name table, not the blob.

/// Size of the leading entry-count field.
pub const HEADER_SIZE: usize = 8;

/// Size of one `{ size, name_offset }` record.
pub const ENTRY_SIZE: usize = 16;

/// Offset of `size` within a record.
pub const ENTRY_SIZE_FIELD: usize = 0;

/// Offset of `name_offset` within a record.
pub const ENTRY_NAME_OFFSET_FIELD: usize = 8;

/// Every stored name starts with this byte.
pub const NAME_PREFIX: u8 = b'/';

/// Every stored name ends with this byte.
pub const NAME_TERMINATOR: u8 = 0;

/// Bytes a name occupies in the pool beyond its own text (prefix + terminator).
pub const NAME_OVERHEAD: usize = 2;

/// Conventional file name of an index at the root of the indexed tree.
pub const DEFAULT_INDEX_FILE_NAME: &str = "~INDEX";

/// Absolute offset of the record for `ordinal`, or `None` on overflow.
pub fn entry_offset(ordinal: u64) -> Option<usize> {
    usize::try_from(ordinal)
        .ok()?
        .checked_mul(ENTRY_SIZE)?
        .checked_add(HEADER_SIZE)
}

/// Absolute offset where the name table begins for a blob holding `file_count`
/// entries, or `None` on overflow.
pub fn name_table_start(file_count: u64) -> Option<usize> {
    entry_offset(file_count)
}

/// Exact blob length for the given names (without their leading `/`).
pub fn encoded_len<I>(names: I) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    names.into_iter().fold(HEADER_SIZE, |acc, name| {
        acc + ENTRY_SIZE + name.as_ref().len() + NAME_OVERHEAD
    })
}
