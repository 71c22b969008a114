//! Initial mirror: full recursive copy of a source directory

use std::path::Path;

use mirror_fs::Filesystem;
use tracing::debug;

use super::collision::{EntryKind, Resolution};
use super::engine::SyncEngine;
use super::report::SyncReport;
use crate::Result;

impl<F: Filesystem> SyncEngine<F> {
    /// Copy every file and directory under `source_dir` into `replica_dir`.
    ///
    /// Existing destination entries are collisions and go through the
    /// collision policy. A kept entry is left alone without a record.
    pub(crate) fn mirror(
        &mut self,
        source_dir: &Path,
        replica_dir: &Path,
        report: &mut SyncReport,
    ) -> Result<()> {
        let listing = match self.fs.list_dir(source_dir) {
            Ok(listing) => listing,
            Err(e) => return self.recover(e.into(), report),
        };

        for file in &listing.files {
            let Some(name) = file.file_name() else {
                continue;
            };
            let destination = replica_dir.join(name);

            if !self.clear_destination(&destination, report)? {
                continue;
            }

            if let Err(e) = self.copy_file(file, &destination, report) {
                self.recover(e, report)?;
            }
        }

        for dir in &listing.dirs {
            let Some(name) = dir.file_name() else {
                continue;
            };
            let destination = replica_dir.join(name);

            if !self.clear_destination(&destination, report)? {
                continue;
            }

            if let Err(e) = self.create_dir(&destination, report) {
                self.recover(e, report)?;
                continue;
            }
            self.mirror(dir, &destination, report)?;
        }

        Ok(())
    }

    /// Settle a collision at `destination`, if there is one.
    ///
    /// Any existing entry collides, even one of a different kind than the
    /// source entry. Returns whether the destination is free.
    fn clear_destination(&mut self, destination: &Path, report: &mut SyncReport) -> Result<bool> {
        let existing = if self.fs.is_dir(destination) {
            EntryKind::Directory
        } else if self.fs.is_file(destination) {
            EntryKind::File
        } else {
            return Ok(true);
        };

        match self.resolve_collision(existing, destination) {
            Ok(Resolution::Keep) => {
                debug!(path = %destination.display(), "Keeping existing entry");
                Ok(false)
            }
            Ok(Resolution::Replace) => Ok(self.remove_existing(destination, report)),
            Err(e) => {
                self.recover(e, report)?;
                Ok(false)
            }
        }
    }
}
