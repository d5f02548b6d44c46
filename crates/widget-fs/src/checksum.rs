//! SHA-256 checksum utilities
//!
//! Checksums use the canonical `sha256:<hex>` format. The tree copier uses
//! them to tell an identical destination apart from a diverged one.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}

/// Whether two files have byte-identical content.
///
/// Unreadable files are never considered identical.
pub fn files_identical(a: &Path, b: &Path) -> bool {
    match (compute_file_checksum(a), compute_file_checksum(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
