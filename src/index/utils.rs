//! Low-level byte reading utilities
//!
//! All reads are bounds-checked against the slice; an out-of-range offset is
//! reported as [`IndexError::MalformedIndex`] rather than a panic.

use byteorder::{ByteOrder, LittleEndian};

use super::layout::NAME_TERMINATOR;
use super::types::error::{IndexError, Result};

/// Read a little-endian `u64` starting at `offset`.
pub fn read_u64_at(buf: &[u8], offset: usize) -> Result<u64> {
    let bytes = offset
        .checked_add(8)
        .and_then(|end| buf.get(offset..end))
        .ok_or_else(|| {
            IndexError::MalformedIndex(format!(
                "u64 at offset {} exceeds buffer of {} bytes",
                offset,
                buf.len()
            ))
        })?;
    Ok(LittleEndian::read_u64(bytes))
}

/// Read a NUL-terminated byte string starting at `offset`.
///
/// The returned slice excludes the terminator.
pub fn read_cstring_at(buf: &[u8], offset: usize) -> Result<&[u8]> {
    let tail = buf.get(offset..).ok_or_else(|| {
        IndexError::MalformedIndex(format!(
            "string offset {} exceeds buffer of {} bytes",
            offset,
            buf.len()
        ))
    })?;
    let end = tail
        .iter()
        .position(|&byte| byte == NAME_TERMINATOR)
        .ok_or_else(|| {
            IndexError::MalformedIndex(format!(
                "missing terminator for string at offset {}",
                offset
            ))
        })?;
    Ok(&tail[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let buf = [0x01, 0x02, 0, 0, 0, 0, 0, 0, 0xff];
        assert_eq!(read_u64_at(&buf, 0).unwrap(), 0x0201);
        assert!(read_u64_at(&buf, 2).unwrap_err().is_malformed());
        assert!(read_u64_at(&buf, usize::MAX).unwrap_err().is_malformed());
    }

    #[test]
    fn cstring_stops_at_first_nul() {
        let buf = b"/a\0/bc\0";
        assert_eq!(read_cstring_at(buf, 0).unwrap(), b"/a");
        assert_eq!(read_cstring_at(buf, 3).unwrap(), b"/bc");
    }

    #[test]
    fn cstring_without_terminator_is_malformed() {
        assert!(read_cstring_at(b"/abc", 0).unwrap_err().is_malformed());
        assert!(read_cstring_at(b"/a\0", 9).unwrap_err().is_malformed());
    }

    #[test]
    fn cstring_at_buffer_end_is_malformed() {
        // offset == len yields an empty tail with no terminator
        assert!(read_cstring_at(b"/a\0", 3).unwrap_err().is_malformed());
    }
}
