//! crates/ta_io/src/hasher.rs
//! SHA-256 digests (lowercase hex) of raw input bytes and canonical results.

use sha2::{Digest, Sha256};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Digest of the canonical JSON encoding of `value`.
#[cfg(feature = "serde")]
pub fn sha256_canonical<T: Serialize>(value: &T) -> crate::IoResult<String> {
    let bytes = crate::canonical_json::to_canonical_json_bytes(value)?;
    Ok(sha256_hex(&bytes))
}
