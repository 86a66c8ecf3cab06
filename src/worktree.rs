//! Working-directory snapshots: reduce a directory subtree into one
//! canonical tree object.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::infra::{read_dir_entries, read_file};
use crate::objects::tree::{self, TreeEntry};
use crate::objects::{Object, ObjectStore, Oid};

/// The repository metadata directory, the sole hard-coded exclusion.
const METADATA_DIR: &str = ".git";

/// Builds canonical tree objects from a working directory.
///
/// The recursion is bottom-up: every blob and subtree is persisted before
/// the tree that references it, so a stored tree's entries are always
/// resolvable — no dangling references are ever written. Entries are sorted
/// byte-wise ascending by name before encoding; without the sort the
/// resulting id would depend on filesystem listing order.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    store: &'a ObjectStore,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder that persists into the given store.
    pub fn new(store: &'a ObjectStore) -> Self {
        TreeBuilder { store }
    }

    /// Snapshots a directory into a tree object and returns its id.
    ///
    /// Building twice from an unchanged directory yields the same id both
    /// times. An empty directory produces the empty tree.
    pub fn build<P: AsRef<Path>>(&self, dir: P) -> Result<Oid> {
        let dir = dir.as_ref();
        let entries = self.collect_entries(dir)?;
        let oid = self.write_tree(entries)?;

        debug!(oid = %oid, dir = %dir.display(), "built tree");
        Ok(oid)
    }

    /// Visits one directory level and returns its sorted entry list,
    /// persisting blobs and subtrees along the way.
    fn collect_entries(&self, dir: &Path) -> Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();

        for child in read_dir_entries(dir)? {
            if child.name == METADATA_DIR {
                continue;
            }

            if child.is_file {
                let data = read_file(&child.path)?;
                let oid = self.store.put(&Object::blob(data))?;
                entries.push(TreeEntry::blob(child.name, oid));
            } else if child.is_dir {
                let sub_entries = self.collect_entries(&child.path)?;
                // Empty directories are not represented
                if sub_entries.is_empty() {
                    continue;
                }
                let oid = self.write_tree(sub_entries)?;
                entries.push(TreeEntry::directory(child.name, oid));
            }
            // Symlinks and other special files are skipped
        }

        entries.sort_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes()));

        Ok(entries)
    }

    /// Encodes an already-sorted entry list and persists it as a tree.
    fn write_tree(&self, entries: Vec<TreeEntry>) -> Result<Oid> {
        let payload = tree::encode_entries(&entries);
        self.store.put(&Object::tree(payload))
    }
}
