//! Core index module

pub mod display;
pub mod format;
pub mod iter;
pub mod layout;
pub mod scan;
pub mod store;
pub mod types;
mod utils;

pub use format::decoder::{decode, decode_all, IndexDecoder};
pub use format::encoder::{encode, IndexEncoder};
pub use iter::EntryIterator;
pub use store::{build_index, read_index, write_index, IndexFile};
pub use types::error::{IndexError, Result};
pub use types::models::{DecodedEntry, EntryRecord, IndexEntry};
