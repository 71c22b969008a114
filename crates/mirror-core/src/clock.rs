//! Time source for the scheduler

use std::time::{Duration, SystemTime};

/// Supplies the current time and suspends the calling thread.
pub trait Clock {
    fn now(&self) -> SystemTime;

    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by [`SystemTime`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
