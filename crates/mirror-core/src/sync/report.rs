//! Pass results returned up the recursion

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::activity::{LogEntry, Operation};

/// Everything one pass did, in the order it happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether the pass ran to completion
    pub success: bool,
    /// Replica mutations applied during the pass
    pub events: Vec<LogEntry>,
    /// Recoverable failures; the affected entries were left as they were
    pub warnings: Vec<String>,
    /// The error that aborted the pass, if any
    pub errors: Vec<String>,
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncReport {
    /// Create an empty, successful report
    pub fn new() -> Self {
        Self {
            success: true,
            events: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Record a replica mutation
    pub fn record(&mut self, operation: Operation, path: &Path) {
        self.events.push(LogEntry::new(operation, path));
    }

    /// Record a recoverable failure
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Mark the pass as aborted
    pub fn fail(&mut self, message: impl Into<String>) {
        self.success = false;
        self.errors.push(message.into());
    }

    /// Number of events of one kind
    pub fn count(&self, operation: Operation) -> usize {
        self.events
            .iter()
            .filter(|e| e.operation == operation)
            .count()
    }

    /// Whether the pass changed nothing and hit no problems
    pub fn is_quiet(&self) -> bool {
        self.events.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_report_is_quiet_success() {
        let report = SyncReport::new();
        assert!(report.success);
        assert!(report.is_quiet());
    }

    #[test]
    fn count_filters_by_operation() {
        let mut report = SyncReport::new();
        report.record(Operation::Removal, Path::new("/r/a"));
        report.record(Operation::Copy, Path::new("/s/a"));
        report.record(Operation::Removal, Path::new("/r/b"));

        assert_eq!(report.count(Operation::Removal), 2);
        assert_eq!(report.count(Operation::Copy), 1);
        assert_eq!(report.count(Operation::Creation), 0);
    }

    #[test]
    fn fail_clears_success() {
        let mut report = SyncReport::new();
        report.fail("boom");
        assert!(!report.success);
        assert_eq!(report.errors, vec!["boom".to_string()]);
    }
}
