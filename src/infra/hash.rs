//! SHA-1 content digests.

use sha1::{Digest, Sha1};

/// SHA-1 digest size in bytes.
pub const DIGEST_SIZE: usize = 20;

/// Computes the SHA-1 digest of the given bytes.
///
/// Pure function: the same input always produces the same 20-byte digest.
/// Object identity is the digest of the encoded form (header plus payload),
/// so callers hash the output of the codec, never the bare payload.
pub fn digest(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha1::new();
    hasher.update(data);

    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(&hasher.finalize());
    out
}
