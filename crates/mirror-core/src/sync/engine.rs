//! SyncEngine implementation
//!
//! The engine owns the resolved tree roots, the filesystem accessor and the
//! policies of a [`MirrorConfig`]. The two pass entry points build a
//! [`SyncReport`] and apply the configured [`ErrorPolicy`] to whatever
//! error stops the traversal.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use mirror_fs::{Filesystem, LocalFs, resolve_root};
use tracing::{debug, info, warn};

use super::collision::{Collision, CollisionPrompt, EntryKind, LinePrompt, Resolution};
use super::report::SyncReport;
use crate::activity::Operation;
use crate::config::{ChangeDetection, CollisionPolicy, ErrorPolicy, MirrorConfig};
use crate::{Error, Result};

/// One-way mirror of a source tree onto a replica tree.
pub struct SyncEngine<F: Filesystem = LocalFs> {
    pub(super) source: PathBuf,
    pub(super) replica: PathBuf,
    pub(super) fs: F,
    pub(super) on_collision: CollisionPolicy,
    pub(super) change_detection: ChangeDetection,
    pub(super) on_copy_error: ErrorPolicy,
    pub(super) preserve_mtime: bool,
    prompt: Option<Box<dyn CollisionPrompt>>,
}

impl SyncEngine<LocalFs> {
    /// Create an engine on the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not an existing directory or the
    /// replica cannot be created.
    pub fn new(config: &MirrorConfig) -> Result<Self> {
        Self::with_filesystem(config, LocalFs::new())
    }
}

impl<F: Filesystem> SyncEngine<F> {
    /// Create an engine over a custom filesystem accessor.
    ///
    /// Roots are resolved against the real filesystem: the source must
    /// exist and the replica is created if missing.
    ///
    /// # Errors
    ///
    /// Also returns [`Error::NestedRoots`] if either root lies inside the
    /// other.
    pub fn with_filesystem(config: &MirrorConfig, fs: F) -> Result<Self> {
        let source = resolve_root(&config.source, false)?;
        let replica = resolve_root(&config.replica, true)?;
        if replica.starts_with(&source) || source.starts_with(&replica) {
            return Err(Error::NestedRoots {
                source_root: source,
                replica,
            });
        }
        debug!(source = %source.display(), replica = %replica.display(), "Resolved mirror roots");

        Ok(Self {
            source,
            replica,
            fs,
            on_collision: config.on_collision,
            change_detection: config.change_detection,
            on_copy_error: config.on_copy_error,
            preserve_mtime: config.preserve_mtime,
            prompt: None,
        })
    }

    /// Attach the prompt consulted under [`CollisionPolicy::Prompt`].
    ///
    /// Without one, the engine asks on standard input.
    pub fn with_prompt(mut self, prompt: impl CollisionPrompt + 'static) -> Self {
        self.prompt = Some(Box::new(prompt));
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn replica(&self) -> &Path {
        &self.replica
    }

    /// Full recursive copy of the source tree into the replica.
    ///
    /// # Errors
    ///
    /// Only returns an error under [`ErrorPolicy::Exit`]; otherwise a failed
    /// pass is reported through [`SyncReport::success`].
    pub fn initial_pass(&mut self) -> Result<SyncReport> {
        info!(source = %self.source.display(), "Starting initial mirror");
        let (source, replica) = (self.source.clone(), self.replica.clone());
        self.run_pass(|engine, report| engine.mirror(&source, &replica, report))
    }

    /// Bring the replica in line with everything that changed in the source
    /// since `last_sync`.
    ///
    /// # Errors
    ///
    /// Only returns an error under [`ErrorPolicy::Exit`].
    pub fn reconcile_pass(&mut self, last_sync: SystemTime) -> Result<SyncReport> {
        debug!(source = %self.source.display(), "Starting reconcile pass");
        let (source, replica) = (self.source.clone(), self.replica.clone());
        self.run_pass(|engine, report| engine.reconcile(&source, &replica, last_sync, report))
    }

    fn run_pass<P>(&mut self, pass: P) -> Result<SyncReport>
    where
        P: FnOnce(&mut Self, &mut SyncReport) -> Result<()>,
    {
        let mut report = SyncReport::new();
        match pass(self, &mut report) {
            Ok(()) => Ok(report),
            Err(e) if self.on_copy_error == ErrorPolicy::Exit => Err(e),
            Err(e) => {
                warn!(error = %e, "Pass aborted");
                report.fail(e.to_string());
                Ok(report)
            }
        }
    }

    /// Apply the error policy to a failed copy, creation or listing.
    ///
    /// Returns `Ok` when the pass should carry on past the entry.
    pub(super) fn recover(&self, error: Error, report: &mut SyncReport) -> Result<()> {
        match self.on_copy_error {
            ErrorPolicy::SkipEntry => {
                warn!(error = %error, "Skipping entry");
                report.warn(format!("skipped: {error}"));
                Ok(())
            }
            ErrorPolicy::AbortPass | ErrorPolicy::Exit => Err(error),
        }
    }

    /// Decide a collision according to the policy.
    pub(super) fn resolve_collision(
        &mut self,
        kind: EntryKind,
        destination: &Path,
    ) -> Result<Resolution> {
        match self.on_collision {
            CollisionPolicy::Overwrite => Ok(Resolution::Replace),
            CollisionPolicy::Keep => Ok(Resolution::Keep),
            CollisionPolicy::Prompt => {
                let collision = Collision {
                    kind,
                    relative: destination
                        .strip_prefix(&self.replica)
                        .unwrap_or(destination)
                        .to_path_buf(),
                    destination: destination.to_path_buf(),
                };
                self.prompt
                    .get_or_insert_with(|| Box::new(LinePrompt::stdio()) as Box<dyn CollisionPrompt>)
                    .resolve(&collision)
            }
        }
    }

    /// Delete one replica file. A failure is a warning, never an error.
    ///
    /// Returns whether the file is gone.
    pub(super) fn remove_file(&self, path: &Path, report: &mut SyncReport) -> bool {
        match self.fs.remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed file");
                report.record(Operation::Removal, path);
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not remove file");
                report.warn(removal_warning("file", path, &e));
                false
            }
        }
    }

    /// Delete a replica directory subtree.
    ///
    /// Records a removal for every contained file and directory, each
    /// directory after its contents, and the root last. If the delete fails
    /// part way, only entries that are actually gone are recorded.
    ///
    /// Returns whether the directory is gone.
    pub(super) fn remove_tree(&self, dir: &Path, report: &mut SyncReport) -> bool {
        let mut doomed = Vec::new();
        let outcome = self
            .collect_tree(dir, &mut doomed)
            .and_then(|()| self.fs.remove_dir_all(dir));

        match outcome {
            Ok(()) => {
                debug!(path = %dir.display(), entries = doomed.len(), "Removed directory");
                for path in &doomed {
                    report.record(Operation::Removal, path);
                }
                true
            }
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Could not remove directory");
                for path in doomed
                    .iter()
                    .filter(|p| !self.fs.is_file(p) && !self.fs.is_dir(p))
                {
                    report.record(Operation::Removal, path);
                }
                report.warn(removal_warning("directory", dir, &e));
                false
            }
        }
    }

    fn collect_tree(&self, dir: &Path, out: &mut Vec<PathBuf>) -> mirror_fs::Result<()> {
        let listing = self.fs.list_dir(dir)?;
        out.extend(listing.files);
        for sub in &listing.dirs {
            self.collect_tree(sub, out)?;
        }
        out.push(dir.to_path_buf());
        Ok(())
    }

    /// Remove whatever occupies `path` in the replica, file or directory.
    ///
    /// Returns whether the path is free.
    pub(super) fn remove_existing(&self, path: &Path, report: &mut SyncReport) -> bool {
        if self.fs.is_dir(path) {
            self.remove_tree(path, report)
        } else {
            self.remove_file(path, report)
        }
    }

    /// Create a replica directory.
    pub(super) fn create_dir(&self, path: &Path, report: &mut SyncReport) -> Result<()> {
        self.fs.create_dir(path)?;
        debug!(path = %path.display(), "Created directory");
        report.record(Operation::Creation, path);
        Ok(())
    }

    /// Copy one source file over its replica counterpart.
    pub(super) fn copy_file(&self, from: &Path, to: &Path, report: &mut SyncReport) -> Result<()> {
        self.fs.copy_file(from, to)?;
        debug!(from = %from.display(), to = %to.display(), "Copied file");
        report.record(Operation::Copy, from);

        if self.preserve_mtime {
            let modified = self.fs.stat(from)?.modified;
            self.fs.set_modified(to, modified)?;
        }
        Ok(())
    }
}

fn removal_warning(noun: &str, path: &Path, error: &mirror_fs::Error) -> String {
    if error.io_kind() == Some(io::ErrorKind::PermissionDenied) {
        format!("could not remove {noun} {}; check its permissions: {error}", path.display())
    } else {
        format!("could not remove {noun} {}: {error}", path.display())
    }
}
