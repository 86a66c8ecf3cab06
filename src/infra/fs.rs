//! Filesystem utilities for file reading, atomic writing, and directory
//! listing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Reads the entire contents of a file as bytes.
///
/// A missing file maps to `Error::PathNotFound`; any other failure is
/// surfaced as `Error::Io`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::PathNotFound(path.as_ref().to_path_buf())
        } else {
            Error::Io(e)
        }
    })
}

/// Writes data to a file atomically.
///
/// Writes to a temporary sibling first, syncs it, then renames it onto the
/// target path. A reader never observes a partially written file: a crash
/// mid-write leaves either no file or a complete one. Missing parent
/// directories are created first; `create_dir_all` is idempotent, so racing
/// writers cannot corrupt each other's directory creation.
pub fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = {
        let mut temp = path.to_path_buf();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "temp".to_string());
        temp.set_file_name(format!(".{}.tmp", file_name));
        temp
    };

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
    }

    // Rename is atomic on most filesystems.
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// One immediate child of a directory.
#[derive(Debug)]
pub struct DirEntry {
    /// The entry's base name.
    pub name: String,
    /// Full path of the entry.
    pub path: PathBuf,
    /// True for a regular file.
    pub is_file: bool,
    /// True for a directory.
    pub is_dir: bool,
}

/// Lists the immediate children of a directory.
///
/// Names come back as the filesystem returns them (no ordering guarantee);
/// callers that need a canonical order sort themselves. Non-UTF-8 names are
/// carried via lossy conversion.
pub fn read_dir_entries<P: AsRef<Path>>(dir: P) -> Result<Vec<DirEntry>> {
    let dir = dir.as_ref();
    let iter = fs::read_dir(dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::PathNotFound(dir.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;

    let mut entries = Vec::new();
    for entry in iter {
        let entry = entry?;
        let file_type = entry.file_type()?;
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            is_file: file_type.is_file(),
            is_dir: file_type.is_dir(),
        });
    }

    Ok(entries)
}
