//! Mirror configuration
//!
//! A [`MirrorConfig`] is the single value that carries every setting into the
//! engine and the scheduler. It is assembled from one or more partial
//! [`ConfigLayer`]s (a config file, then command-line overrides), merged in
//! order with later layers taking precedence.

mod interval;
mod layer;
mod policy;

pub use interval::SyncInterval;
pub use layer::ConfigLayer;
pub use policy::{ChangeDetection, CollisionPolicy, ErrorPolicy};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fully resolved settings for one mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Root of the tree being mirrored; must exist
    pub source: PathBuf,
    /// Root of the mirror; created if absent
    pub replica: PathBuf,
    /// Activity log file; created if absent
    pub log_file: PathBuf,
    /// Time between pass starts
    pub interval: SyncInterval,
    /// What the initial mirror does when a destination entry already exists
    pub on_collision: CollisionPolicy,
    /// How the reconciler decides a file changed
    pub change_detection: ChangeDetection,
    /// What a failed copy or directory creation does to the pass
    pub on_copy_error: ErrorPolicy,
    /// Copy the source modification time onto replica files
    pub preserve_mtime: bool,
    /// Write warnings and pass errors to the log file as well as the console
    pub persist_warnings: bool,
    /// Echo log lines to the console
    pub echo_to_console: bool,
}

impl MirrorConfig {
    /// Create a configuration with default policies.
    pub fn new(
        source: impl Into<PathBuf>,
        replica: impl Into<PathBuf>,
        log_file: impl Into<PathBuf>,
        interval: SyncInterval,
    ) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
            log_file: log_file.into(),
            interval,
            on_collision: CollisionPolicy::default(),
            change_detection: ChangeDetection::default(),
            on_copy_error: ErrorPolicy::default(),
            preserve_mtime: true,
            persist_warnings: true,
            echo_to_console: true,
        }
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = policy;
        self
    }

    pub fn with_change_detection(mut self, detection: ChangeDetection) -> Self {
        self.change_detection = detection;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_copy_error = policy;
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_to_console = echo;
        self
    }
}
