//! SHA-256 content checksums
//!
//! A single canonical digest format (lowercase hex) used for change
//! detection across the workspace.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::{Error, Result};

/// Compute the SHA-256 digest of a byte slice as lowercase hex.
pub fn checksum_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Compute the SHA-256 digest of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn checksum_file(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(checksum_bytes(&content))
}
