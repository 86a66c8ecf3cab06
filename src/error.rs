//! Error types for mingit.

use std::fmt;
use std::path::PathBuf;

/// The main error type for mingit operations.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred.
    Io(std::io::Error),

    /// The specified path is not a valid Git repository.
    NotARepository(PathBuf),

    /// A repository already exists at the specified path.
    AlreadyARepository(PathBuf),

    /// The specified path was not found.
    PathNotFound(PathBuf),

    /// The requested object was not found in the store.
    ObjectNotFound(String),

    /// The provided string is not a valid object ID.
    InvalidOid(String),

    /// An object header could not be parsed.
    MalformedHeader(String),

    /// The size declared in an object header disagrees with the payload.
    SizeMismatch {
        /// The size declared in the header.
        expected: usize,
        /// The actual payload size in bytes.
        actual: usize,
    },

    /// A tree payload is structurally invalid.
    CorruptTree(String),

    /// A stored object could not be decompressed or decoded.
    CorruptObject {
        /// The object ID.
        oid: String,
        /// The reason for the failure.
        reason: String,
    },

    /// Type mismatch when expecting a specific object kind.
    TypeMismatch {
        /// The expected kind.
        expected: &'static str,
        /// The actual kind.
        actual: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::NotARepository(path) => {
                write!(f, "not a git repository: {}", path.display())
            }
            Error::AlreadyARepository(path) => {
                write!(f, "repository already exists: {}", path.display())
            }
            Error::PathNotFound(path) => write!(f, "path not found: {}", path.display()),
            Error::ObjectNotFound(oid) => write!(f, "object not found: {}", oid),
            Error::InvalidOid(s) => write!(f, "invalid object id: {}", s),
            Error::MalformedHeader(reason) => write!(f, "malformed object header: {}", reason),
            Error::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "size mismatch: header says {} but payload is {} bytes",
                    expected, actual
                )
            }
            Error::CorruptTree(reason) => write!(f, "corrupt tree payload: {}", reason),
            Error::CorruptObject { oid, reason } => {
                write!(f, "corrupt object {}: {}", oid, reason)
            }
            Error::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for mingit operations.
pub type Result<T> = std::result::Result<T, Error>;
