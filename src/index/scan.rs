//! Directory traversal producing encoder input.
//!
//! Walks a tree recursively and yields one [`IndexEntry`] per regular file,
//! with the path made relative to the root and separators normalized to `/`.
//! On unix the name keeps the file system's raw bytes.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, trace};
#[cfg(not(unix))]
use log::warn;
use walkdir::WalkDir;

use super::types::error::Result;
use super::types::models::IndexEntry;

/// Scans `root` and returns every regular file below it.
///
/// Siblings are visited in file-name order so an unchanged tree always
/// produces the same sequence. Directories are skipped; symlinks are
/// included only when they resolve to a regular file, so dangling links
/// are left out.
pub fn scan(root: impl AsRef<Path>) -> Result<Vec<IndexEntry>> {
    scan_excluding(root, None)
}

/// Like [`scan`], but leaves out `exclude` if it lies inside the tree.
///
/// Used to keep a previously written index from listing itself.
pub fn scan_excluding(root: impl AsRef<Path>, exclude: Option<&Path>) -> Result<Vec<IndexEntry>> {
    let root = root.as_ref();
    info!("Scanning directory: {}", root.display());

    let excluded = exclude.and_then(|path| fs::canonicalize(path).ok());
    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }

        let metadata = if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("Skipping unresolvable link {}: {}", entry.path().display(), e);
                    continue;
                }
            }
        } else {
            entry.metadata()?
        };
        if !metadata.is_file() {
            debug!("Skipping non-file entry: {}", entry.path().display());
            continue;
        }

        if is_excluded(entry.path(), excluded.as_ref()) {
            debug!("Skipping index output: {}", entry.path().display());
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let indexed = IndexEntry::new(to_index_path(relative), metadata.len());
        trace!("Found /{} ({} bytes)", indexed.name_lossy(), indexed.size);
        entries.push(indexed);
    }

    info!("Scanned {} files under {}", entries.len(), root.display());
    Ok(entries)
}

fn is_excluded(path: &Path, excluded: Option<&PathBuf>) -> bool {
    let Some(excluded) = excluded else {
        return false;
    };
    if path.file_name() != excluded.file_name() {
        return false;
    }
    fs::canonicalize(path).map_or(false, |p| &p == excluded)
}

/// Joins path components with `/`, whatever the platform separator.
pub fn to_index_path(relative: &Path) -> Vec<u8> {
    let mut name = Vec::new();
    for (i, component) in relative.components().enumerate() {
        if i > 0 {
            name.push(b'/');
        }
        name.extend_from_slice(&component_bytes(component.as_os_str()));
    }
    name
}

#[cfg(unix)]
fn component_bytes(component: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(component.as_bytes())
}

#[cfg(not(unix))]
fn component_bytes(component: &OsStr) -> Cow<'_, [u8]> {
    match component.to_string_lossy() {
        Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
        Cow::Owned(text) => {
            warn!("Path component is not valid Unicode, storing lossy form: {}", text);
            Cow::Owned(text.into_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn index_path_uses_forward_slashes() {
        let path: PathBuf = ["sub", "dir", "file.bin"].iter().collect();
        assert_eq!(to_index_path(&path), b"sub/dir/file.bin");
        assert_eq!(to_index_path(Path::new("top.txt")), b"top.txt");
    }

    #[test]
    fn scan_skips_directories_and_sorts_siblings() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b/empty")).unwrap();
        fs::write(dir.path().join("b/inner.txt"), b"123").unwrap();
        fs::write(dir.path().join("c.txt"), b"").unwrap();
        fs::write(dir.path().join("a.bin"), vec![0u8; 10]).unwrap();

        let entries = scan(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                IndexEntry::new("a.bin", 10),
                IndexEntry::new("b/inner.txt", 3),
                IndexEntry::new("c.txt", 0),
            ]
        );
    }

    #[test]
    fn scan_excludes_named_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("keep"), b"x").unwrap();
        fs::write(dir.path().join("~INDEX"), b"old").unwrap();

        let output = dir.path().join("~INDEX");
        let entries = scan_excluding(dir.path(), Some(&output)).unwrap();
        assert_eq!(entries, vec![IndexEntry::new("keep", 1)]);
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_dangling_links_and_follows_live_ones() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("real.txt"), b"hello").unwrap();
        symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();
        symlink(dir.path().join("real.txt"), dir.path().join("live")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        symlink(dir.path().join("sub"), dir.path().join("to_dir")).unwrap();

        let entries = scan(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![IndexEntry::new("live", 5), IndexEntry::new("real.txt", 5)]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn scan_keeps_raw_name_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"bad\xffname");
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join(raw), b"abc").unwrap();

        let entries = scan(dir.path()).unwrap();
        assert_eq!(entries, vec![IndexEntry::new(&b"sub/bad\xffname"[..], 3)]);
    }

    #[test]
    fn scan_of_empty_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(scan(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn scan_of_missing_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = scan(dir.path().join("missing")).unwrap_err();
        assert!(!err.is_malformed());
    }
}
