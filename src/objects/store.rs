//! Loose object store: content-addressed, zlib-compressed object files.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::codec;
use super::oid::Oid;
use super::Object;
use crate::error::{Error, Result};
use crate::infra::{compress, decompress, digest, read_file, write_file_atomic};

/// A store mapping object ids to durable bytes and back.
///
/// Objects are stored as individual zlib-compressed files under a two-level
/// fan-out layout: `objects/<first-2-hex-chars>/<remaining-38-hex-chars>`.
/// The store is the sole owner of the object files; all operations are
/// synchronous and run to completion.
#[derive(Debug)]
pub struct ObjectStore {
    /// Path to the objects directory (e.g., `.git/objects`).
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Creates a new ObjectStore rooted at the given objects directory.
    pub fn new<P: AsRef<Path>>(objects_dir: P) -> Self {
        ObjectStore {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    /// Converts an id to the path of its object file.
    ///
    /// For example, `da39a3ee5e6b4b0d3255bfef95601890afd80709` becomes
    /// `objects/da/39a3ee5e6b4b0d3255bfef95601890afd80709`.
    pub fn object_path(&self, oid: &Oid) -> PathBuf {
        let hex = oid.to_hex();
        self.objects_dir.join(&hex[..2]).join(&hex[2..])
    }

    /// Writes an object to the store and returns its id.
    ///
    /// Encodes the object, hashes the encoded bytes, and — unless the id's
    /// path already exists — compresses and writes them atomically, creating
    /// missing directory components. Identical content maps to the same path,
    /// so re-writing it is skipped; the id is returned either way
    /// (idempotent).
    pub fn put(&self, object: &Object) -> Result<Oid> {
        let encoded = codec::encode(object);
        let oid = Oid::from_bytes(digest(&encoded));

        // Content addressing: an existing path already holds these bytes.
        if self.exists(&oid) {
            trace!(oid = %oid, "object already stored");
            return Ok(oid);
        }

        let compressed = compress(&encoded);
        write_file_atomic(self.object_path(&oid), &compressed)?;

        debug!(oid = %oid, kind = object.kind().as_str(), size = object.size(), "stored object");
        Ok(oid)
    }

    /// Reads an object from the store by its id.
    ///
    /// # Errors
    ///
    /// - `Error::ObjectNotFound` if no file exists at the id's path.
    /// - `Error::CorruptObject` if decompression or decoding fails; corrupted
    ///   data never comes back as a partial object.
    pub fn get(&self, oid: &Oid) -> Result<Object> {
        let compressed = read_file(self.object_path(oid)).map_err(|e| {
            if matches!(e, Error::PathNotFound(_)) {
                Error::ObjectNotFound(oid.to_hex())
            } else {
                e
            }
        })?;

        let encoded = decompress(&compressed).map_err(|_| Error::CorruptObject {
            oid: oid.to_hex(),
            reason: "zlib decompression failed".to_string(),
        })?;

        codec::decode(&encoded).map_err(|e| Error::CorruptObject {
            oid: oid.to_hex(),
            reason: e.to_string(),
        })
    }

    /// Checks whether an object exists, without decompressing anything.
    pub fn exists(&self, oid: &Oid) -> bool {
        self.object_path(oid).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ObjectKind;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> ObjectStore {
        let objects_dir = temp_dir.path().join("objects");
        fs::create_dir(&objects_dir).unwrap();
        ObjectStore::new(objects_dir)
    }

    // S-001: object_path fans out on the first two hex characters
    #[test]
    fn test_object_path() {
        let store = ObjectStore::new("/repo/.git/objects");
        let oid = Oid::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let path = store.object_path(&oid);

        assert!(path.ends_with(Path::new("da").join("39a3ee5e6b4b0d3255bfef95601890afd80709")));
    }

    // S-002: put then get roundtrips the object
    #[test]
    fn test_put_get_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let object = Object::blob(b"Hello, World!".to_vec());
        let oid = store.put(&object).unwrap();

        let loaded = store.get(&oid).unwrap();
        assert_eq!(loaded, object);
    }

    // S-003: put produces the well-known ids for known content
    #[test]
    fn test_put_known_hashes() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let oid = store.put(&Object::blob(Vec::new())).unwrap();
        assert_eq!(oid.to_hex(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");

        let oid = store.put(&Object::blob(b"hello\n".to_vec())).unwrap();
        assert_eq!(oid.to_hex(), "ce013625030ba8dba906f756967f9e9ca394464a");

        let oid = store.put(&Object::tree(Vec::new())).unwrap();
        assert_eq!(oid.to_hex(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
    }

    // S-004: put is idempotent and deduplicating
    #[test]
    fn test_put_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let object = Object::blob(b"Test content".to_vec());
        let oid1 = store.put(&object).unwrap();
        let mtime1 = fs::metadata(store.object_path(&oid1)).unwrap().modified().unwrap();

        let oid2 = store.put(&object).unwrap();
        let mtime2 = fs::metadata(store.object_path(&oid2)).unwrap().modified().unwrap();

        assert_eq!(oid1, oid2);
        // Second put short-circuits; the file is not rewritten
        assert_eq!(mtime1, mtime2);
    }

    // S-005: get on an absent id fails with ObjectNotFound
    #[test]
    fn test_get_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let oid = Oid::from_hex("0000000000000000000000000000000000000000").unwrap();
        assert!(matches!(store.get(&oid), Err(Error::ObjectNotFound(_))));
    }

    // S-006: exists reflects the store contents
    #[test]
    fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let oid = store.put(&Object::blob(b"test".to_vec())).unwrap();
        assert!(store.exists(&oid));

        let missing = Oid::from_hex("0000000000000000000000000000000000000000").unwrap();
        assert!(!store.exists(&missing));
    }

    // S-007: kind survives the roundtrip for every object kind
    #[test]
    fn test_put_get_kinds() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        for object in [
            Object::blob(b"blob content".to_vec()),
            Object::tree(b"".to_vec()),
            Object::commit(b"commit content".to_vec()),
        ] {
            let oid = store.put(&object).unwrap();
            assert_eq!(store.get(&oid).unwrap().kind(), object.kind());
        }
    }

    // S-008: truncating a stored file makes get fail with CorruptObject
    #[test]
    fn test_tamper_truncation() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let oid = store.put(&Object::blob(b"precious data".to_vec())).unwrap();
        let path = store.object_path(&oid);

        let mut bytes = fs::read(&path).unwrap();
        bytes.truncate(bytes.len() - 1);
        fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            store.get(&oid),
            Err(Error::CorruptObject { .. })
        ));
    }

    // S-009: garbage in a stored file never comes back as data
    #[test]
    fn test_tamper_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let oid = store.put(&Object::blob(b"data".to_vec())).unwrap();
        fs::write(store.object_path(&oid), b"not zlib at all").unwrap();

        assert!(matches!(
            store.get(&oid),
            Err(Error::CorruptObject { .. })
        ));
    }

    // S-010: a valid zlib stream holding a bad header is CorruptObject
    #[test]
    fn test_tamper_bad_header() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let oid = store.put(&Object::blob(b"x".to_vec())).unwrap();
        let bogus = crate::infra::compress(b"mystery 1\0x");
        fs::write(store.object_path(&oid), &bogus).unwrap();

        assert!(matches!(
            store.get(&oid),
            Err(Error::CorruptObject { .. })
        ));
    }

    // S-011: put creates the fan-out directory structure
    #[test]
    fn test_put_creates_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let objects_dir = temp_dir.path().join("objects");
        fs::create_dir(&objects_dir).unwrap();
        let store = ObjectStore::new(&objects_dir);

        let oid = store.put(&Object::blob(b"Test".to_vec())).unwrap();

        let hex = oid.to_hex();
        assert!(objects_dir.join(&hex[..2]).is_dir());
        assert!(objects_dir.join(&hex[..2]).join(&hex[2..]).is_file());
    }

    // S-012: large content roundtrips
    #[test]
    fn test_large_content() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let content: Vec<u8> = (0..1024 * 1024).map(|i| (i % 256) as u8).collect();
        let oid = store.put(&Object::blob(content.clone())).unwrap();

        let loaded = store.get(&oid).unwrap();
        assert_eq!(loaded.kind(), ObjectKind::Blob);
        assert_eq!(loaded.payload(), &content[..]);
    }
}
