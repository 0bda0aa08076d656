//! Index format layer.
//!
//! # Module Organization
//!
//! - [`encoder`]: Builds an index blob from `(path, size)` pairs
//! - [`decoder`]: Validates a blob and resolves its entries
//!
//! Both sides share the offsets defined in [`layout`](crate::index::layout).

pub mod decoder;
pub mod encoder;
