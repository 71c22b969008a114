//! Incremental reconciler
//!
//! Each directory level runs four steps in a fixed order: prune replica
//! files missing from the source, prune replica directories missing from
//! the source, copy changed source files, then descend. Directories carry no
//! timestamp check of their own; a directory new to the replica is filled by
//! the initial mirror.

use std::path::Path;
use std::time::SystemTime;

use mirror_fs::{DirListing, Filesystem};
use tracing::debug;

use super::engine::SyncEngine;
use super::report::SyncReport;
use crate::config::ChangeDetection;
use crate::Result;

impl<F: Filesystem> SyncEngine<F> {
    /// Bring `replica_dir` in line with `source_dir`.
    pub(crate) fn reconcile(
        &mut self,
        source_dir: &Path,
        replica_dir: &Path,
        last_sync: SystemTime,
        report: &mut SyncReport,
    ) -> Result<()> {
        let source = match self.fs.list_dir(source_dir) {
            Ok(listing) => listing,
            Err(e) => return self.recover(e.into(), report),
        };
        let replica = if self.fs.is_dir(replica_dir) {
            match self.fs.list_dir(replica_dir) {
                Ok(listing) => listing,
                Err(e) => return self.recover(e.into(), report),
            }
        } else {
            DirListing::default()
        };

        self.prune_files(&source, &replica, report);
        self.prune_dirs(&source, &replica, report);
        self.propagate_files(&source, replica_dir, last_sync, report)?;

        for dir in &source.dirs {
            let Some(name) = dir.file_name() else {
                continue;
            };
            let destination = replica_dir.join(name);

            if self.fs.is_dir(&destination) {
                self.reconcile(dir, &destination, last_sync, report)?;
            } else {
                debug!(path = %dir.display(), "New directory, mirroring in full");
                if let Err(e) = self.create_dir(&destination, report) {
                    self.recover(e, report)?;
                    continue;
                }
                self.mirror(dir, &destination, report)?;
            }
        }

        Ok(())
    }

    fn prune_files(&self, source: &DirListing, replica: &DirListing, report: &mut SyncReport) {
        for file in &replica.files {
            match file.file_name() {
                Some(name) if source.has_file(name) => {}
                _ => {
                    self.remove_file(file, report);
                }
            }
        }
    }

    fn prune_dirs(&self, source: &DirListing, replica: &DirListing, report: &mut SyncReport) {
        for dir in &replica.dirs {
            match dir.file_name() {
                Some(name) if source.has_dir(name) => {}
                _ => {
                    self.remove_tree(dir, report);
                }
            }
        }
    }

    fn propagate_files(
        &self,
        source: &DirListing,
        replica_dir: &Path,
        last_sync: SystemTime,
        report: &mut SyncReport,
    ) -> Result<()> {
        for file in &source.files {
            let Some(name) = file.file_name() else {
                continue;
            };
            let destination = replica_dir.join(name);

            let changed = match self.has_changed(file, &destination, last_sync) {
                Ok(changed) => changed,
                Err(e) => {
                    self.recover(e, report)?;
                    continue;
                }
            };
            if !changed {
                continue;
            }

            // Source wins: no prompt here.
            if self.fs.is_file(&destination) && !self.remove_file(&destination, report) {
                continue;
            }
            if let Err(e) = self.copy_file(file, &destination, report) {
                self.recover(e, report)?;
            }
        }
        Ok(())
    }

    /// Whether a source file must be copied over its replica counterpart.
    fn has_changed(&self, source: &Path, replica: &Path, last_sync: SystemTime) -> Result<bool> {
        let stat = self.fs.stat(source)?;
        if stat.modified > last_sync {
            return Ok(true);
        }
        if !self.fs.is_file(replica) {
            return Ok(true);
        }

        let changed = match self.change_detection {
            ChangeDetection::ModifiedTime => false,
            ChangeDetection::SizeAndModifiedTime => self.fs.stat(replica)?.len != stat.len,
            ChangeDetection::ContentHash => {
                self.fs.checksum(source)? != self.fs.checksum(replica)?
            }
        };
        if changed {
            debug!(path = %source.display(), mode = ?self.change_detection, "Content differs from replica");
        }
        Ok(changed)
    }
}
