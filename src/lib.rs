//! # mingit
//!
//! A minimal pure Rust Git object database.
//!
//! This crate implements the content-addressable core of a git-compatible
//! version-control tool: encoding, hashing, compressing, persisting and
//! reconstructing blob, tree and commit objects, plus the recursive
//! algorithm that snapshots a working directory into a canonical tree.
//!
//! ## Features
//!
//! - Loose object store with the standard two-level fan-out layout
//! - Byte-exact canonical encoding, so identical content always hashes
//!   identically
//! - Working-directory snapshots (`write-tree`) and commit assembly
//!   (`commit-tree`)
//! - Repository bootstrap, open and upward discovery
//!
//! No packfiles, no index, no refs beyond HEAD bootstrap, no networking.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mingit::{Repository, Result, Signature};
//!
//! fn main() -> Result<()> {
//!     let repo = Repository::init("path/to/repo")?;
//!
//!     // Snapshot the working directory
//!     let tree = repo.write_tree()?;
//!
//!     // Record it as a root commit
//!     let sig = Signature::new("Jane Doe", "jane@example.com", 1234567890, 540);
//!     let commit = repo.commit_tree(&tree.to_hex(), None, "init", &sig, &sig)?;
//!     println!("created commit {}", commit);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`error`] - Error types and Result alias
//! - [`repository`] - Main `Repository` type, one method per operation
//! - [`objects`] - Object model, codecs, ids and the loose object store
//! - [`worktree`] - Directory-to-tree snapshot builder

pub mod error;
pub mod objects;
pub mod repository;
pub mod worktree;

// Internal modules (not part of public API)
pub(crate) mod infra;

// Re-export primary types for convenient access
pub use error::{Error, Result};
pub use repository::Repository;

// Re-export object types
pub use objects::{Object, ObjectKind, ObjectStore, Oid, Signature, TreeEntry};

// Re-export the snapshot builder
pub use worktree::TreeBuilder;
