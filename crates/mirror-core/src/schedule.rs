//! Synchronization loop
//!
//! The [`Scheduler`] runs the initial mirror until it succeeds once, then the
//! reconciler forever, sleeping between passes so that pass starts are one
//! interval apart. A pass that overruns the interval is followed by the next
//! one immediately.

use std::convert::Infallible;
use std::time::{Duration, SystemTime};

use mirror_fs::Filesystem;
use tracing::{debug, info, warn};

use crate::activity::{ActivityLog, Operation};
use crate::clock::{Clock, SystemClock};
use crate::sync::{SyncEngine, SyncReport};
use crate::Result;

/// The two kinds of pass the scheduler drives.
pub trait SyncPass {
    fn initial_pass(&mut self) -> Result<SyncReport>;

    fn reconcile_pass(&mut self, last_sync: SystemTime) -> Result<SyncReport>;
}

impl<F: Filesystem> SyncPass for SyncEngine<F> {
    fn initial_pass(&mut self) -> Result<SyncReport> {
        SyncEngine::initial_pass(self)
    }

    fn reconcile_pass(&mut self, last_sync: SystemTime) -> Result<SyncReport> {
        SyncEngine::reconcile_pass(self, last_sync)
    }
}

/// Where the loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pass has completed yet; the next pass is a full mirror
    Bootstrap,
    /// Incremental passes against the end of the last completed pass
    Steady { last_sync: SystemTime },
}

/// Result of one [`Scheduler::tick`].
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub report: SyncReport,
    /// Time from pass start until its log lines were flushed
    pub elapsed: Duration,
    /// Time slept afterwards
    pub slept: Duration,
}

/// Sleep that keeps pass starts one interval apart; never negative.
pub fn compensated_sleep(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Drives passes at a fixed cadence and flushes their reports.
pub struct Scheduler<P, C = SystemClock> {
    pass: P,
    log: ActivityLog,
    interval: Duration,
    clock: C,
    phase: Phase,
}

impl<P: SyncPass> Scheduler<P, SystemClock> {
    pub fn new(pass: P, log: ActivityLog, interval: Duration) -> Self {
        Self::with_clock(pass, log, interval, SystemClock)
    }
}

impl<P: SyncPass, C: Clock> Scheduler<P, C> {
    pub fn with_clock(pass: P, log: ActivityLog, interval: Duration, clock: C) -> Self {
        Self {
            pass,
            log,
            interval,
            clock,
            phase: Phase::Bootstrap,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run one pass and flush its report, without sleeping.
    ///
    /// On success the phase moves to [`Phase::Steady`] with `last_sync` set
    /// to the moment the pass's filesystem work finished. An aborted pass
    /// leaves the phase alone so the next pass covers the same window.
    ///
    /// # Errors
    ///
    /// Returns process-fatal errors: a pass error under the exit policy, or
    /// a failure to write the activity log.
    pub fn run_pass(&mut self) -> Result<(SyncReport, Duration)> {
        let started = self.clock.now();

        let report = match self.phase {
            Phase::Bootstrap => self.pass.initial_pass()?,
            Phase::Steady { last_sync } => self.pass.reconcile_pass(last_sync)?,
        };
        let finished = self.clock.now();
        if report.success {
            self.phase = Phase::Steady {
                last_sync: finished,
            };
        }

        self.log.flush(&report)?;

        let elapsed = self
            .clock
            .now()
            .duration_since(started)
            .unwrap_or(Duration::ZERO);

        if report.is_quiet() {
            debug!(elapsed_ms = elapsed.as_millis() as u64, "Pass found nothing to do");
        } else if report.success {
            info!(
                copied = report.count(Operation::Copy),
                removed = report.count(Operation::Removal),
                created = report.count(Operation::Creation),
                warnings = report.warnings.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Pass complete"
            );
        } else {
            warn!(
                errors = ?report.errors,
                elapsed_ms = elapsed.as_millis() as u64,
                "Pass did not complete; retrying next interval"
            );
        }

        Ok((report, elapsed))
    }

    /// Run one pass, then sleep out the rest of the interval.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let (report, elapsed) = self.run_pass()?;
        let slept = compensated_sleep(self.interval, elapsed);
        self.clock.sleep(slept);
        Ok(TickOutcome {
            report,
            elapsed,
            slept,
        })
    }

    /// Tick forever. Only returns on a process-fatal error.
    pub fn run(mut self) -> Result<Infallible> {
        info!(interval_secs = self.interval.as_secs(), "Synchronization loop started");
        loop {
            self.tick()?;
        }
    }
}
