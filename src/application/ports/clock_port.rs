//! ClockPort - source of wall-clock timestamps
//!
//! Launch recency is stamped through this port so tests can pin time.

use std::cell::Cell;

/// Port interface for reading the current time
pub trait ClockPort {
    /// Current time as Unix epoch milliseconds
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A manually advanced clock for testing
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Move the clock forward
    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl ClockPort for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}
