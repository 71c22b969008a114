//! [`MirrorFixture`]: a throwaway source/replica/log layout.

use filetime::FileTime;
use mirror_core::{MirrorConfig, SyncInterval};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A temporary directory holding `source/`, `replica/` and the path of an
/// activity log, with helpers to shape and inspect both trees.
///
/// Helpers panic on I/O failure; this type only exists for tests.
pub struct MirrorFixture {
    dir: TempDir,
    source: PathBuf,
    replica: PathBuf,
    log_file: PathBuf,
}

impl Default for MirrorFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorFixture {
    /// Create the layout with an empty source and no replica yet.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root = canonical_root(dir.path());
        let source = root.join("source");
        fs::create_dir(&source).expect("Failed to create source directory");

        Self {
            replica: root.join("replica"),
            log_file: root.join("logs").join("mirror.txt"),
            source,
            dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn replica(&self) -> &Path {
        &self.replica
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// A config over this layout with every policy at its default.
    pub fn config(&self, interval_secs: u64) -> MirrorConfig {
        MirrorConfig::new(
            &self.source,
            &self.replica,
            &self.log_file,
            SyncInterval::from_secs(interval_secs),
        )
    }

    /// Write a source file, creating parent directories.
    pub fn write_source(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.source.join(rel), content)
    }

    /// Write a replica file, creating parent directories.
    pub fn write_replica(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.replica.join(rel), content)
    }

    pub fn mkdir_source(&self, rel: &str) -> PathBuf {
        make_dir(&self.source.join(rel))
    }

    pub fn mkdir_replica(&self, rel: &str) -> PathBuf {
        make_dir(&self.replica.join(rel))
    }

    /// Remove a source file or directory tree.
    pub fn remove_source(&self, rel: &str) {
        let path = self.source.join(rel);
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.unwrap_or_else(|e| panic!("Failed to remove {}: {}", path.display(), e));
    }

    /// Set the modification time of a source file.
    pub fn set_source_mtime(&self, rel: &str, modified: SystemTime) {
        set_mtime(&self.source.join(rel), modified);
    }

    /// Set the modification time of a replica file.
    pub fn set_replica_mtime(&self, rel: &str, modified: SystemTime) {
        set_mtime(&self.replica.join(rel), modified);
    }

    /// Push a source file's modification time `by` into the past, so it
    /// predates any `last_sync` taken after the call.
    pub fn age_source(&self, rel: &str, by: Duration) {
        let modified = SystemTime::now() - by;
        self.set_source_mtime(rel, modified);
    }

    pub fn read_replica(&self, rel: &str) -> String {
        let path = self.replica.join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Every entry under the source, as `/`-separated relative paths with a
    /// trailing `/` on directories.
    pub fn source_entries(&self) -> BTreeSet<String> {
        entries(&self.source)
    }

    /// Every entry under the replica, in the same shape as
    /// [`source_entries`](Self::source_entries).
    pub fn replica_entries(&self) -> BTreeSet<String> {
        entries(&self.replica)
    }

    /// Assert both trees hold the same entries and identical file content.
    ///
    /// # Panics
    ///
    /// Panics on the first difference.
    pub fn assert_converged(&self) {
        let source = self.source_entries();
        assert_eq!(source, self.replica_entries(), "Replica entries differ from source");

        for rel in source.iter().filter(|e| !e.ends_with('/')) {
            let expected = fs::read(self.source.join(rel))
                .unwrap_or_else(|e| panic!("Failed to read source {}: {}", rel, e));
            let actual = fs::read(self.replica.join(rel))
                .unwrap_or_else(|e| panic!("Failed to read replica {}: {}", rel, e));
            assert!(expected == actual, "Content of {} differs", rel);
        }
    }

    /// Lines of the activity log file, empty if it doesn't exist.
    pub fn log_lines(&self) -> Vec<String> {
        fs::read_to_string(&self.log_file)
            .map(|s| s.lines().map(str::to_owned).collect())
            .unwrap_or_default()
    }
}

fn canonical_root(path: &Path) -> PathBuf {
    mirror_fs::resolve_root(path, false)
        .unwrap_or_else(|e| panic!("Failed to resolve {}: {}", path.display(), e))
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
    }
    fs::write(path, content).unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    path.to_path_buf()
}

fn make_dir(path: &Path) -> PathBuf {
    fs::create_dir_all(path).unwrap_or_else(|e| panic!("Failed to create {}: {}", path.display(), e));
    path.to_path_buf()
}

fn set_mtime(path: &Path, modified: SystemTime) {
    filetime::set_file_mtime(path, FileTime::from_system_time(modified))
        .unwrap_or_else(|e| panic!("Failed to set mtime on {}: {}", path.display(), e));
}

fn entries(root: &Path) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    if root.is_dir() {
        collect(root, root, &mut out);
    }
    out
}

fn collect(root: &Path, dir: &Path, out: &mut BTreeSet<String>) {
    let read = fs::read_dir(dir).unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e));
    for entry in read {
        let path = entry.expect("Failed to read directory entry").path();
        let rel = path
            .strip_prefix(root)
            .expect("Entry outside root")
            .to_string_lossy()
            .replace('\\', "/");
        if path.is_dir() {
            out.insert(format!("{rel}/"));
            collect(root, &path, out);
        } else {
            out.insert(rel);
        }
    }
}
