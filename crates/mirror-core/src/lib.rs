//! Synchronization engine for Directory Mirror
//!
//! One-way, periodic mirroring of a source directory tree onto a replica:
//!
//! - **Initial mirror**: full recursive copy, run until it succeeds once
//! - **Reconciler**: per pass, prunes replica entries that left the source
//!   and copies files changed since the last pass
//! - **Activity log**: one line per replica mutation, to file and console
//! - **Scheduler**: fixed-cadence loop with sleep compensation
//!
//! # Architecture
//!
//! ```text
//!            mirror-cli
//!                |
//!           mirror-core
//!   Scheduler -> SyncEngine -> ActivityLog
//!                |
//!            mirror-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mirror_core::{ActivityLog, MirrorConfig, Scheduler, SyncEngine, SyncInterval};
//!
//! fn example() -> mirror_core::Result<()> {
//!     let interval: SyncInterval = "00:05:00".parse()?;
//!     let config = MirrorConfig::new("source", "replica", "mirror.txt", interval);
//!
//!     let engine = SyncEngine::new(&config)?;
//!     let log = ActivityLog::from_config(&config)?;
//!     Scheduler::new(engine, log, interval.as_duration()).run()?;
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod clock;
pub mod config;
pub mod error;
pub mod schedule;
pub mod sync;

pub use activity::{ActivityLog, LogEntry, Operation};
pub use clock::{Clock, SystemClock};
pub use config::{
    ChangeDetection, CollisionPolicy, ConfigLayer, ErrorPolicy, MirrorConfig, SyncInterval,
};
pub use error::{Error, Result};
pub use schedule::{Phase, Scheduler, SyncPass, TickOutcome, compensated_sleep};
pub use sync::{Collision, CollisionPrompt, EntryKind, LinePrompt, Resolution, SyncEngine, SyncReport};
