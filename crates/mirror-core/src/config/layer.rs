//! Partial configuration layers
//!
//! A layer holds whatever subset of settings one source provides. Layers
//! are merged in order: a config file first, then command-line arguments.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{ChangeDetection, CollisionPolicy, ErrorPolicy, MirrorConfig, SyncInterval};
use crate::{Error, Result};

/// One partial source of settings, as parsed from a config file.
///
/// # Example
///
/// ```toml
/// source = "/data/source"
/// replica = "/backup/replica"
/// log_file = "/var/log/mirror.txt"
/// interval = "00:05:00"
/// on_collision = "overwrite"
/// change_detection = "content-hash"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub source: Option<PathBuf>,
    pub replica: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub interval: Option<SyncInterval>,
    pub on_collision: Option<CollisionPolicy>,
    pub change_detection: Option<ChangeDetection>,
    pub on_copy_error: Option<ErrorPolicy>,
    pub preserve_mtime: Option<bool>,
    pub persist_warnings: Option<bool>,
    pub echo_to_console: Option<bool>,
}

impl ConfigLayer {
    /// Merge another layer into this one; values set in `other` win.
    pub fn merge(&mut self, other: ConfigLayer) {
        fn overlay<T>(base: &mut Option<T>, other: Option<T>) {
            if other.is_some() {
                *base = other;
            }
        }

        overlay(&mut self.source, other.source);
        overlay(&mut self.replica, other.replica);
        overlay(&mut self.log_file, other.log_file);
        overlay(&mut self.interval, other.interval);
        overlay(&mut self.on_collision, other.on_collision);
        overlay(&mut self.change_detection, other.change_detection);
        overlay(&mut self.on_copy_error, other.on_copy_error);
        overlay(&mut self.preserve_mtime, other.preserve_mtime);
        overlay(&mut self.persist_warnings, other.persist_warnings);
        overlay(&mut self.echo_to_console, other.echo_to_console);
    }

    /// Turn the merged layer into a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetting`] if a path or the interval was never
    /// provided, and [`Error::InvalidLogFile`] if the log file is not a
    /// `.txt` path.
    pub fn resolve(self) -> Result<MirrorConfig> {
        let source = self.source.ok_or(Error::MissingSetting { name: "source" })?;
        let replica = self.replica.ok_or(Error::MissingSetting { name: "replica" })?;
        let log_file = self
            .log_file
            .ok_or(Error::MissingSetting { name: "log_file" })?;
        let is_txt = log_file
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if !is_txt {
            return Err(Error::InvalidLogFile { path: log_file });
        }
        let interval = self
            .interval
            .ok_or(Error::MissingSetting { name: "interval" })?;

        let mut config = MirrorConfig::new(source, replica, log_file, interval);
        if let Some(policy) = self.on_collision {
            config.on_collision = policy;
        }
        if let Some(detection) = self.change_detection {
            config.change_detection = detection;
        }
        if let Some(policy) = self.on_copy_error {
            config.on_copy_error = policy;
        }
        if let Some(preserve) = self.preserve_mtime {
            config.preserve_mtime = preserve;
        }
        if let Some(persist) = self.persist_warnings {
            config.persist_warnings = persist;
        }
        if let Some(echo) = self.echo_to_console {
            config.echo_to_console = echo;
        }
        Ok(config)
    }
}
