//! Activity log records

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Timestamp layout used in every log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of replica mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// A directory was created in the replica
    Creation,
    /// A source file was copied into the replica
    Copy,
    /// A replica file or directory was deleted
    Removal,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Creation => "Creation",
            Self::Copy => "Copy",
            Self::Removal => "Removal",
        };
        f.write_str(name)
    }
}

/// One immutable activity log record.
///
/// Displays as `"<Operation> of <absolute-path> <timestamp>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub operation: Operation,
    /// Source file for a copy, replica entry otherwise
    pub path: PathBuf,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    /// Record an operation on `path` at the current local time.
    pub fn new(operation: Operation, path: &Path) -> Self {
        Self {
            operation,
            path: mirror_fs::absolute_path(path),
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} {}",
            self.operation,
            self.path.display(),
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Format a free-form notice (warning or error) as a log line.
pub fn notice_line(label: &str, message: &str, at: DateTime<Local>) -> String {
    format!("{label}: {message} {}", at.format(TIMESTAMP_FORMAT))
}
