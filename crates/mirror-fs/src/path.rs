//! Root path resolution

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Resolve a tree root to a canonical absolute directory path.
///
/// With `create` set the directory (and any missing parents) is created
/// first. The result never carries a Windows verbatim prefix, so paths
/// derived from it print the way users typed them.
///
/// # Errors
///
/// Returns [`Error::NotADirectory`] if the path exists but is not a
/// directory, or an I/O error if it cannot be created or resolved.
pub fn resolve_root(path: &Path, create: bool) -> Result<PathBuf> {
    if create && !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), "Created root directory");
    }

    if !path.is_dir() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}

/// Make a path absolute without touching the filesystem.
///
/// Works for paths that no longer exist, such as an entry that was just
/// removed. Falls back to the input if the working directory is unavailable.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
