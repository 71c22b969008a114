//! Policy enums that shape engine behavior

use serde::{Deserialize, Serialize};

/// Decision for a same-named entry already present at the destination of
/// the initial mirror.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Replace the destination with the source entry
    Overwrite,
    /// Leave the destination untouched
    Keep,
    /// Ask through the attached collision prompt
    #[default]
    Prompt,
}

/// How the reconciler decides a source file needs copying.
///
/// Every mode copies a file modified after the last pass and a file missing
/// from the replica; stronger modes only add triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeDetection {
    /// Modification time after the last pass
    #[default]
    ModifiedTime,
    /// Also copy when source and replica sizes differ
    SizeAndModifiedTime,
    /// Also copy when source and replica checksums differ
    ContentHash,
}

/// Scope of a failed copy, directory creation or listing.
///
/// Failed deletions are never governed by this; they always leave the entry
/// in place with a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Warn, skip the entry and continue the pass
    SkipEntry,
    /// Stop the pass; the next tick retries from the same baseline
    #[default]
    AbortPass,
    /// Stop the scheduler and return the error
    Exit,
}
