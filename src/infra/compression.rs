//! Zlib compression and decompression for stored objects.

use crate::error::{Error, Result};

/// Compresses data using zlib at level 6.
///
/// Level 6 keeps compressed object files deterministic for identical input,
/// which the store relies on when racing writers produce the same object.
pub fn compress(data: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(data, 6)
}

/// Decompresses zlib-compressed data.
///
/// Validates the two-byte zlib header before inflating, so truncated or
/// non-zlib input fails up front instead of producing partial output.
///
/// # Errors
///
/// Returns `Error::CorruptObject` if the input is empty, the header is
/// invalid, or the DEFLATE stream is corrupted or truncated. The `oid` field
/// is left empty; the store fills it in when it knows which object failed.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 2 || !is_valid_zlib_header(data[0], data[1]) {
        return Err(corrupt("invalid zlib header"));
    }

    miniz_oxide::inflate::decompress_to_vec_zlib(data)
        .map_err(|_| corrupt("zlib decompression failed"))
}

fn corrupt(reason: &str) -> Error {
    Error::CorruptObject {
        oid: String::new(),
        reason: reason.to_string(),
    }
}

/// Validates a zlib header.
///
/// The compression method (low 4 bits of CMF) must be 8 (DEFLATE), the
/// window size (high 4 bits) at most 7, and (CMF * 256 + FLG) % 31 == 0.
fn is_valid_zlib_header(cmf: u8, flg: u8) -> bool {
    if cmf & 0x0F != 8 {
        return false;
    }
    if (cmf >> 4) & 0x0F > 7 {
        return false;
    }
    ((cmf as u16) * 256 + (flg as u16)) % 31 == 0
}
