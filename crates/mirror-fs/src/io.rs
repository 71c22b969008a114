//! Filesystem accessor used by the synchronization engine
//!
//! The engine only talks to the disk through [`Filesystem`], which keeps the
//! reconciliation algorithm testable against wrappers that inject failures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;
use tracing::debug;

use crate::{Error, Result, checksum};

/// The direct children of one directory, split by kind.
///
/// Both lists are sorted by path so traversal order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

impl DirListing {
    /// Whether a file with the given name is directly in this listing.
    pub fn has_file(&self, name: &std::ffi::OsStr) -> bool {
        self.files.iter().any(|f| f.file_name() == Some(name))
    }

    /// Whether a directory with the given name is directly in this listing.
    pub fn has_dir(&self, name: &std::ffi::OsStr) -> bool {
        self.dirs.iter().any(|d| d.file_name() == Some(name))
    }
}

/// Metadata the change detector needs about a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub modified: SystemTime,
    pub len: u64,
}

/// Operations the mirror needs from a filesystem.
pub trait Filesystem {
    /// List files and directories directly under `dir`.
    fn list_dir(&self, dir: &Path) -> Result<DirListing>;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Modification time and size of a file.
    fn stat(&self, path: &Path) -> Result<FileStat>;

    /// SHA-256 checksum of a file's content.
    fn checksum(&self, path: &Path) -> Result<String>;

    /// Copy the content of `from` to `to`, replacing any existing file.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Set the modification time of `path`.
    fn set_modified(&self, path: &Path, modified: SystemTime) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove a directory and everything beneath it.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Create a directory, including missing parents.
    fn create_dir(&self, path: &Path) -> Result<()>;
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFs {
    fn list_dir(&self, dir: &Path) -> Result<DirListing> {
        let mut listing = DirListing::default();

        for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let path = entry.path();

            // Follows symlinks, so a link is mirrored as whatever it points at.
            match fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => listing.dirs.push(path),
                Ok(meta) if meta.is_file() => listing.files.push(path),
                Ok(_) => debug!(path = %path.display(), "Skipping special file"),
                Err(e) => debug!(path = %path.display(), error = %e, "Skipping unreadable entry"),
            }
        }

        listing.files.sort();
        listing.dirs.sort();
        Ok(listing)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn stat(&self, path: &Path) -> Result<FileStat> {
        let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let modified = meta.modified().map_err(|e| Error::io(path, e))?;
        Ok(FileStat {
            modified,
            len: meta.len(),
        })
    }

    fn checksum(&self, path: &Path) -> Result<String> {
        checksum::compute_file_checksum(path).map_err(|e| Error::io(path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to).map_err(|source| Error::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn set_modified(&self, path: &Path, modified: SystemTime) -> Result<()> {
        filetime::set_file_mtime(path, FileTime::from_system_time(modified))
            .map_err(|e| Error::io(path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))
    }
}
