//! Model artifact fingerprints.

use std::path::Path;

use sha2::Digest;

use crate::error::Result;
use crate::file::read_model_bytes;

/// Lowercase hex SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// SHA-256 of a model file, hex encoded.
pub fn fingerprint_file(path: &Path) -> Result<String> {
    let bytes = read_model_bytes(path)?;
    Ok(sha256_hex(&bytes))
}
