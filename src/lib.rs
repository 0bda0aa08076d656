//! # dirindex
//!
//! Builds and reads flat binary `~INDEX` files describing a directory tree.
//!
//! An index records the byte size and root-relative path of every regular
//! file in a single blob: a little-endian entry count, a table of fixed
//! `{ size, name_offset }` records, then a pool of `/`-prefixed,
//! NUL-terminated names.
pub mod index;

// Re-export the main types for convenience
pub use index::{
    build_index,
    decode,
    decode_all,
    encode,
    DecodedEntry,
    EntryIterator,
    EntryRecord,
    IndexDecoder,
    IndexEncoder,
    IndexEntry,
    IndexError,
    IndexFile,
    Result,
};
