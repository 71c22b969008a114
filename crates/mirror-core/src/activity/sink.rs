//! Destinations for activity log lines

use fs2::FileExt;
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::{Error, Result};

/// A destination for log lines.
pub trait LogSink {
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Whether lines written here outlive the process.
    fn is_persistent(&self) -> bool {
        true
    }
}

/// Appends lines to a text file.
///
/// Each line is written under an exclusive advisory lock so a concurrent
/// reader never observes a partial line.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Open a sink on `path`, creating the file and its parent directories
    /// if absent. Existing content is kept.
    pub fn create(path: &Path) -> Result<Self> {
        let log_error = |source| Error::ActivityLog {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(log_error)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(log_error)?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl LogSink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let log_error = |source| Error::ActivityLog {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(log_error)?;

        file.lock_exclusive().map_err(log_error)?;
        writeln!(file, "{line}").map_err(log_error)?;
        // Lock released when file is dropped
        Ok(())
    }
}

/// Echoes lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        println!("{line}");
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

/// Collects lines in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl LogSink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }
}
