//! Synchronization engine
//!
//! This module provides:
//! - **engine**: the [`SyncEngine`] and its two pass entry points
//! - **mirror**: the initial full-tree copy
//! - **reconcile**: the incremental per-pass diff
//! - **collision**: policy hooks for entries already present in the replica
//! - **report**: the [`SyncReport`] every pass returns

mod collision;
mod engine;
mod mirror;
mod reconcile;
mod report;

pub use collision::{Collision, CollisionPrompt, EntryKind, LinePrompt, Resolution};
pub use engine::SyncEngine;
pub use report::SyncReport;
