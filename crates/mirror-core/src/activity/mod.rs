//! Append-only activity log
//!
//! Every replica mutation a pass performs ends up here as one line, written
//! to each attached [`LogSink`]. The scheduler flushes a pass's
//! [`SyncReport`](crate::sync::SyncReport) into the log once the pass
//! returns, so the engine itself never touches log I/O.

mod entry;
mod sink;

pub use entry::{LogEntry, Operation, TIMESTAMP_FORMAT, notice_line};
pub use sink::{ConsoleSink, FileSink, LogSink, MemorySink};

use chrono::Local;

use crate::config::MirrorConfig;
use crate::sync::SyncReport;
use crate::Result;

/// Fan-out of log lines to a set of sinks.
pub struct ActivityLog {
    sinks: Vec<Box<dyn LogSink>>,
    persist_warnings: bool,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    /// Create a log with no sinks that persists warnings.
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            persist_warnings: true,
        }
    }

    /// Build the log described by a configuration: the log file, plus the
    /// console when echo is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created.
    pub fn from_config(config: &MirrorConfig) -> Result<Self> {
        let mut log = Self::new()
            .with_sink(FileSink::create(&config.log_file)?)
            .persist_warnings(config.persist_warnings);
        if config.echo_to_console {
            log = log.with_sink(ConsoleSink);
        }
        Ok(log)
    }

    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Whether warnings and pass errors reach persistent sinks.
    ///
    /// Non-persistent sinks never receive them; they are already on the
    /// console through `tracing`.
    pub fn persist_warnings(mut self, persist: bool) -> Self {
        self.persist_warnings = persist;
        self
    }

    /// Append one entry to every sink.
    pub fn record(&mut self, entry: &LogEntry) -> Result<()> {
        let line = entry.to_string();
        for sink in &mut self.sinks {
            sink.write_line(&line)?;
        }
        Ok(())
    }

    fn notice(&mut self, label: &str, message: &str) -> Result<()> {
        if !self.persist_warnings {
            return Ok(());
        }
        let line = notice_line(label, message, Local::now());
        for sink in self.sinks.iter_mut().filter(|s| s.is_persistent()) {
            sink.write_line(&line)?;
        }
        Ok(())
    }

    /// Write a pass's events, then its warnings and errors.
    pub fn flush(&mut self, report: &SyncReport) -> Result<()> {
        for entry in &report.events {
            self.record(entry)?;
        }
        for warning in &report.warnings {
            self.notice("Warning", warning)?;
        }
        for error in &report.errors {
            self.notice("Error", error)?;
        }
        Ok(())
    }
}
