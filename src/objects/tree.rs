//! Tree payload encoding: an ordered list of named references.
//!
//! A tree payload is the concatenation of `"<mode> <name>\0"` followed by the
//! 20 raw digest bytes of the target, one run per entry, with entries sorted
//! byte-wise ascending by name. Reordering entries changes the payload bytes
//! and therefore the tree's id, so the sort order is part of the format.

use super::oid::{Oid, OID_BYTES};
use crate::error::{Error, Result};

/// Mode string for a regular file entry.
pub const MODE_FILE: &str = "100644";

/// Mode string for a subdirectory entry.
pub const MODE_DIR: &str = "040000";

/// An entry in a tree payload.
///
/// The mode is carried through as the exact string found on disk; only
/// `"040000"` marks a tree reference, every other mode a blob reference.
/// No symlink or executable distinction is modelled beyond the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    mode: String,
    name: String,
    oid: Oid,
}

impl TreeEntry {
    /// Creates an entry with an explicit mode string.
    pub fn new(mode: impl Into<String>, name: impl Into<String>, oid: Oid) -> Self {
        TreeEntry {
            mode: mode.into(),
            name: name.into(),
            oid,
        }
    }

    /// Creates a regular-file entry (mode `100644`).
    pub fn blob(name: impl Into<String>, oid: Oid) -> Self {
        TreeEntry::new(MODE_FILE, name, oid)
    }

    /// Creates a subdirectory entry (mode `040000`).
    pub fn directory(name: impl Into<String>, oid: Oid) -> Self {
        TreeEntry::new(MODE_DIR, name, oid)
    }

    /// Returns the mode string.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Returns the entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the id of the referenced object.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// Returns true if this entry references a tree.
    pub fn is_tree(&self) -> bool {
        self.mode == MODE_DIR
    }

    /// Returns the referenced kind name (`"tree"` or `"blob"`), as printed
    /// by tree listings.
    pub fn kind_str(&self) -> &'static str {
        if self.is_tree() {
            "tree"
        } else {
            "blob"
        }
    }
}

/// Encodes entries into tree payload bytes.
///
/// Entries must already be in canonical sort order; this function
/// concatenates without sorting.
pub fn encode_entries(entries: &[TreeEntry]) -> Vec<u8> {
    let mut payload = Vec::new();
    for entry in entries {
        payload.extend_from_slice(entry.mode.as_bytes());
        payload.push(b' ');
        payload.extend_from_slice(entry.name.as_bytes());
        payload.push(0);
        payload.extend_from_slice(entry.oid.as_bytes());
    }
    payload
}

/// Decodes tree payload bytes into the ordered entry list.
///
/// Advances a cursor over `"<mode> <name>\0"` plus 20 raw digest bytes until
/// the payload is exhausted.
///
/// # Errors
///
/// Returns `Error::CorruptTree` if a separator is missing, the mode or name
/// is not valid UTF-8, or fewer than 20 bytes remain after a null terminator.
pub fn decode_entries(payload: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < payload.len() {
        let space_pos = payload[pos..]
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| corrupt("missing space after mode"))?;

        let mode = std::str::from_utf8(&payload[pos..pos + space_pos])
            .map_err(|_| corrupt("mode is not valid UTF-8"))?
            .to_string();

        pos += space_pos + 1;

        let null_pos = payload[pos..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| corrupt("missing null terminator after name"))?;

        let name = std::str::from_utf8(&payload[pos..pos + null_pos])
            .map_err(|_| corrupt("entry name is not valid UTF-8"))?
            .to_string();

        pos += null_pos + 1;

        if pos + OID_BYTES > payload.len() {
            return Err(corrupt("truncated object id"));
        }

        let mut oid_bytes = [0u8; OID_BYTES];
        oid_bytes.copy_from_slice(&payload[pos..pos + OID_BYTES]);
        pos += OID_BYTES;

        entries.push(TreeEntry {
            mode,
            name,
            oid: Oid::from_bytes(oid_bytes),
        });
    }

    Ok(entries)
}

fn corrupt(reason: &str) -> Error {
    Error::CorruptTree(reason.to_string())
}
