//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Sync interval is not in `HH:MM:SS` form
    #[error("Invalid sync interval '{value}': expected HH:MM:SS, e.g. 00:03:00 for 3 minutes")]
    InvalidInterval { value: String },

    /// A required setting was not supplied by any configuration source
    #[error("Missing setting: {name}")]
    MissingSetting { name: &'static str },

    /// Activity log path does not name a `.txt` file
    #[error("Invalid log file '{path}': expected a .txt file")]
    InvalidLogFile { path: PathBuf },

    /// One root lies inside the other, so the mirror would copy into itself
    #[error("Source {source_root} and replica {replica} must not contain each other")]
    NestedRoots {
        source_root: PathBuf,
        replica: PathBuf,
    },

    /// Activity log file could not be written
    #[error("Activity log error at {path}: {source}")]
    ActivityLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Collision prompt could not read an answer
    #[error("Collision prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),
}
