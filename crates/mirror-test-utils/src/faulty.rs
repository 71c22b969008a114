//! [`FaultyFs`]: a local filesystem that fails on demand.
//!
//! Permission bits are no use for failure tests when the suite runs as root,
//! so failures are injected per path instead.

use mirror_fs::{DirListing, Error, FileStat, Filesystem, LocalFs, Result};
use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

#[derive(Debug, Default)]
struct Faults {
    deny_remove: HashSet<PathBuf>,
    fail_copy_to: HashSet<PathBuf>,
    fail_create: HashSet<PathBuf>,
}

/// [`LocalFs`] with per-path failures. Clones share the same fault set.
#[derive(Debug, Clone, Default)]
pub struct FaultyFs {
    inner: LocalFs,
    faults: Rc<RefCell<Faults>>,
}

impl FaultyFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `remove_file` and `remove_dir_all` on `path` fail with
    /// permission denied.
    pub fn deny_remove(&self, path: impl Into<PathBuf>) {
        self.faults.borrow_mut().deny_remove.insert(path.into());
    }

    /// Make copies whose destination is `path` fail.
    pub fn fail_copy_to(&self, path: impl Into<PathBuf>) {
        self.faults.borrow_mut().fail_copy_to.insert(path.into());
    }

    /// Make creating the directory `path` fail.
    pub fn fail_create(&self, path: impl Into<PathBuf>) {
        self.faults.borrow_mut().fail_create.insert(path.into());
    }

    /// Remove every injected failure.
    pub fn heal(&self) {
        *self.faults.borrow_mut() = Faults::default();
    }

    fn denied(path: &Path, kind: io::ErrorKind) -> Error {
        Error::io(path, io::Error::new(kind, "injected failure"))
    }
}

impl Filesystem for FaultyFs {
    fn list_dir(&self, dir: &Path) -> Result<DirListing> {
        self.inner.list_dir(dir)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn stat(&self, path: &Path) -> Result<FileStat> {
        self.inner.stat(path)
    }

    fn checksum(&self, path: &Path) -> Result<String> {
        self.inner.checksum(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        if self.faults.borrow().fail_copy_to.contains(to) {
            return Err(Error::Copy {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: io::Error::new(io::ErrorKind::StorageFull, "injected failure"),
            });
        }
        self.inner.copy_file(from, to)
    }

    fn set_modified(&self, path: &Path, modified: SystemTime) -> Result<()> {
        self.inner.set_modified(path, modified)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        if self.faults.borrow().deny_remove.contains(path) {
            return Err(Self::denied(path, io::ErrorKind::PermissionDenied));
        }
        self.inner.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if self.faults.borrow().deny_remove.contains(path) {
            return Err(Self::denied(path, io::ErrorKind::PermissionDenied));
        }
        self.inner.remove_dir_all(path)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        if self.faults.borrow().fail_create.contains(path) {
            return Err(Self::denied(path, io::ErrorKind::PermissionDenied));
        }
        self.inner.create_dir(path)
    }
}
