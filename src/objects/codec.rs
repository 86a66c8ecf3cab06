//! Canonical object encoding: `"<kind> <size>\0<payload>"`.
//!
//! The encoding is the unique byte sequence a logical object always produces;
//! the digest of that sequence is the object's identity, so both directions
//! here must be byte-exact.

use super::{Object, ObjectKind};
use crate::error::{Error, Result};

/// Encodes an object into its canonical on-disk byte form.
///
/// The header is derived from the payload length on every call; it is never
/// stored inside the payload. The size is the decimal ASCII byte count.
pub fn encode(object: &Object) -> Vec<u8> {
    let header = format!("{} {}\0", object.kind().as_str(), object.size());
    let mut encoded = header.into_bytes();
    encoded.extend_from_slice(object.payload());
    encoded
}

/// Decodes canonical object bytes back into an `Object`.
///
/// Splits on the first null byte and parses the `"<kind> <digits>"` prefix.
/// The remaining bytes are the payload, exactly; any discrepancy between the
/// declared and actual length is an error, never silently truncated or
/// padded.
///
/// # Errors
///
/// - `Error::MalformedHeader` if the prefix is not parseable.
/// - `Error::SizeMismatch` if the declared length disagrees with the
///   remaining byte count.
pub fn decode(data: &[u8]) -> Result<Object> {
    let null_pos = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| malformed("missing null byte"))?;

    let header = std::str::from_utf8(&data[..null_pos])
        .map_err(|_| malformed("header is not valid UTF-8"))?;

    let (kind_str, size_str) = header
        .split_once(' ')
        .ok_or_else(|| malformed("missing space between kind and size"))?;

    let kind = ObjectKind::parse(kind_str)
        .ok_or_else(|| malformed(&format!("unknown object kind: {}", kind_str)))?;

    let expected: usize = size_str
        .parse()
        .map_err(|_| malformed(&format!("invalid size: {}", size_str)))?;

    let payload = &data[null_pos + 1..];
    if payload.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: payload.len(),
        });
    }

    Ok(Object::new(kind, payload.to_vec()))
}

fn malformed(reason: &str) -> Error {
    Error::MalformedHeader(reason.to_string())
}
