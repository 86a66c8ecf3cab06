//! Repository handle and the entry points for each object operation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::infra::{read_file, write_file_atomic};
use crate::objects::tree::{self, TreeEntry};
use crate::objects::{commit, Object, ObjectKind, ObjectStore, Oid, Signature};
use crate::worktree::TreeBuilder;

/// The initial HEAD content written by `init`.
const INITIAL_HEAD: &str = "ref: refs/heads/main\n";

/// A Git repository.
///
/// This is the main entry point of the library. It owns the paths and hands
/// out an [`ObjectStore`] for the repository's objects directory; every
/// operation maps to one method here.
#[derive(Debug)]
pub struct Repository {
    /// The root directory of the working tree.
    work_dir: PathBuf,
    /// The path to the `.git` directory.
    git_dir: PathBuf,
}

impl Repository {
    /// Validates that a directory is a usable Git directory.
    ///
    /// A valid `.git` directory must contain at least a `HEAD` file, an
    /// `objects/` directory and a `refs/` directory.
    fn validate_git_dir(git_dir: &Path) -> Result<()> {
        if !git_dir.is_dir()
            || !git_dir.join("HEAD").is_file()
            || !git_dir.join("objects").is_dir()
            || !git_dir.join("refs").is_dir()
        {
            return Err(Error::NotARepository(git_dir.to_path_buf()));
        }
        Ok(())
    }

    /// Initializes a new repository at the given directory.
    ///
    /// Creates `.git/`, `.git/objects/` and `.git/refs/`, and writes `HEAD`
    /// pointing at `refs/heads/main`.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyARepository` if a `.git` directory is already
    /// present.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let work_dir = path.as_ref().to_path_buf();
        let git_dir = work_dir.join(".git");

        if git_dir.exists() {
            return Err(Error::AlreadyARepository(work_dir));
        }

        for dir in ["objects", "refs"] {
            fs::create_dir_all(git_dir.join(dir))?;
        }
        write_file_atomic(git_dir.join("HEAD"), INITIAL_HEAD.as_bytes())?;

        Ok(Repository { work_dir, git_dir })
    }

    /// Opens an existing repository.
    ///
    /// The path can point to either the repository root (containing `.git/`)
    /// or the `.git` directory itself.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let abs_path = path
            .canonicalize()
            .map_err(|_| Error::NotARepository(path.to_path_buf()))?;

        let (work_dir, git_dir) = if abs_path.ends_with(".git") {
            let git_dir = abs_path.clone();
            let work_dir = abs_path
                .parent()
                .ok_or_else(|| Error::NotARepository(path.to_path_buf()))?
                .to_path_buf();
            (work_dir, git_dir)
        } else {
            let git_dir = abs_path.join(".git");
            (abs_path, git_dir)
        };

        Self::validate_git_dir(&git_dir)?;

        Ok(Repository { work_dir, git_dir })
    }

    /// Discovers a repository by searching upward from the given path.
    ///
    /// Walks up the directory tree until a valid `.git` directory is found
    /// or the filesystem root is reached.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut current = path
            .canonicalize()
            .map_err(|_| Error::NotARepository(path.to_path_buf()))?;

        loop {
            let git_dir = current.join(".git");
            if git_dir.is_dir() && Self::validate_git_dir(&git_dir).is_ok() {
                return Ok(Repository {
                    work_dir: current,
                    git_dir,
                });
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(Error::NotARepository(path.to_path_buf())),
            }
        }
    }

    /// Returns the path to the repository root (working directory).
    pub fn path(&self) -> &Path {
        &self.work_dir
    }

    /// Returns the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Returns an object store for this repository's objects directory.
    pub fn object_store(&self) -> ObjectStore {
        ObjectStore::new(self.git_dir.join("objects"))
    }

    /// Stores a file's bytes as a blob and returns its id.
    ///
    /// The file contents are held verbatim; no metadata is recorded.
    /// Equivalent of `hash-object -w`.
    pub fn store_blob<P: AsRef<Path>>(&self, file: P) -> Result<Oid> {
        let data = read_file(file)?;
        self.object_store().put(&Object::blob(data))
    }

    /// Retrieves any object by its hex id.
    pub fn object(&self, oid_hex: &str) -> Result<Object> {
        let oid = Oid::from_hex(oid_hex)?;
        self.object_store().get(&oid)
    }

    /// Retrieves a blob's raw payload by its hex id.
    ///
    /// Equivalent of `cat-file -p` on a blob.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if the id names a tree or commit.
    pub fn cat_blob(&self, oid_hex: &str) -> Result<Vec<u8>> {
        let object = self.object(oid_hex)?;
        if object.kind() != ObjectKind::Blob {
            return Err(Error::TypeMismatch {
                expected: "blob",
                actual: object.kind().as_str(),
            });
        }
        Ok(object.into_payload())
    }

    /// Lists a tree's entries by its hex id, in stored (sorted) order.
    ///
    /// Equivalent of `ls-tree`; callers wanting names only take
    /// [`TreeEntry::name`] per entry.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if the id names a blob or commit.
    pub fn list_tree(&self, oid_hex: &str) -> Result<Vec<TreeEntry>> {
        let object = self.object(oid_hex)?;
        if object.kind() != ObjectKind::Tree {
            return Err(Error::TypeMismatch {
                expected: "tree",
                actual: object.kind().as_str(),
            });
        }
        tree::decode_entries(object.payload())
    }

    /// Snapshots the working directory into a tree object and returns its
    /// id. Equivalent of `write-tree`.
    pub fn write_tree(&self) -> Result<Oid> {
        let store = self.object_store();
        TreeBuilder::new(&store).build(&self.work_dir)
    }

    /// Builds and stores a commit object, returning its id.
    ///
    /// The tree and optional parent are opaque references; they are parsed
    /// as hex ids but not checked for presence in the store. Author and
    /// committer identity and timestamps come from the caller. Equivalent of
    /// `commit-tree`.
    pub fn commit_tree(
        &self,
        tree_hex: &str,
        parent_hex: Option<&str>,
        message: &str,
        author: &Signature,
        committer: &Signature,
    ) -> Result<Oid> {
        let tree = Oid::from_hex(tree_hex)?;
        let parent = match parent_hex {
            Some(hex) => Some(Oid::from_hex(hex)?),
            None => None,
        };

        let payload = commit::format_commit(&tree, parent.as_ref(), author, committer, message);
        self.object_store().put(&Object::commit(payload))
    }
}
