//! [`ManualClock`] for deterministic scheduler tests.

use mirror_core::Clock;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, SystemTime};

#[derive(Debug)]
struct State {
    now: SystemTime,
    sleeps: Vec<Duration>,
}

/// A clock that advances only through [`ManualClock::advance`] or
/// [`Clock::sleep`]. Clones share the same time, so a test can hand one
/// clone to the scheduler and keep another to move time mid-pass.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Rc<RefCell<State>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Start at the current wall-clock time.
    pub fn new() -> Self {
        Self::starting_at(SystemTime::now())
    }

    pub fn starting_at(now: SystemTime) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                now,
                sleeps: Vec::new(),
            })),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.state.borrow_mut().now += by;
    }

    /// Every duration passed to [`Clock::sleep`], in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.borrow().sleeps.clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        self.state.borrow().now
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.state.borrow_mut();
        state.sleeps.push(duration);
        state.now += duration;
    }
}
