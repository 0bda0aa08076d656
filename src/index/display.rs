//! Text rendering of index contents.

use std::io::{self, Write};

use super::types::models::DecodedEntry;

/// First line of a non-empty listing.
pub const LISTING_HEADER: &str = "#:{filesize,filename}";

/// Printed instead of a listing when the index has no entries.
pub const EMPTY_MESSAGE: &str = "The index file is empty.";

/// Renders one entry as `ordinal:{size,"name"}`.
pub fn format_entry(entry: &DecodedEntry<'_>) -> String {
    format!("{}:{{{},\"{}\"}}", entry.ordinal, entry.size, entry.name())
}

/// Writes the full listing for `entries`, one line each.
pub fn write_listing<W: Write>(out: &mut W, entries: &[DecodedEntry<'_>]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "{}", EMPTY_MESSAGE);
    }

    writeln!(out, "{}", LISTING_HEADER)?;
    for entry in entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    Ok(())
}

/// Confirmation printed after a successful build.
pub fn summary_line(count: u64) -> String {
    let noun = if count == 1 { "entry" } else { "entries" };
    format!("Index file created successfully with {} file {}.", count, noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::format::decoder::decode_all;
    use crate::index::format::encoder::encode;

    #[test]
    fn lists_entries_with_header() {
        let blob = encode([("a.txt", 5u64), ("sub/b.bin", 1024)]);
        let entries = decode_all(&blob).unwrap();

        let mut out = Vec::new();
        write_listing(&mut out, &entries).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#:{filesize,filename}\n0:{5,\"/a.txt\"}\n1:{1024,\"/sub/b.bin\"}\n"
        );
    }

    #[test]
    fn empty_listing_is_single_line() {
        let mut out = Vec::new();
        write_listing(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "The index file is empty.\n");
    }

    #[test]
    fn summary_is_pluralized() {
        assert_eq!(summary_line(0), "Index file created successfully with 0 file entries.");
        assert_eq!(summary_line(1), "Index file created successfully with 1 file entry.");
        assert_eq!(summary_line(7), "Index file created successfully with 7 file entries.");
    }
}
