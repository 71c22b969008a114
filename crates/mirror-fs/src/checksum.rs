//! SHA-256 checksum utilities
//!
//! Checksums use the canonical format `sha256:<hex>` and back the opt-in
//! content-hash change detection.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

const CHUNK: usize = 64 * 1024;

/// Compute the SHA-256 checksum of a file's contents.
///
/// The file is streamed in fixed-size chunks so large files are never held
/// in memory at once.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}
