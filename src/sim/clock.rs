//! Time sources for driving the simulation
//!
//! The session reads the clock exactly once per `advance`, so every timed rule
//! (countdown, overlay, double-jump window) compares against one reading.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Seconds on a monotonic clock
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Seconds elapsed since `earlier` (negative if `earlier` is later)
    pub fn since(&self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

/// Anything that can produce monotonic timestamps
pub trait Clock {
    fn now(&mut self) -> Timestamp;
}

/// Deterministic clock that advances one fixed step per reading
///
/// Timestamps are computed as `ticks / hz`, so whole seconds are exact.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    hz: u32,
    ticks: u64,
}

impl FixedStepClock {
    pub fn new(hz: u32) -> Self {
        Self { hz: hz.max(1), ticks: 0 }
    }

    /// Ticks handed out so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for FixedStepClock {
    fn now(&mut self) -> Timestamp {
        let t = Timestamp(self.ticks as f64 / self.hz as f64);
        self.ticks += 1;
        t
    }
}

/// Wall clock measured from construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_whole_seconds_are_exact() {
        let mut clock = FixedStepClock::new(60);
        let mut last = Timestamp::ZERO;
        for _ in 0..=180 {
            last = clock.now();
        }
        assert_eq!(last, Timestamp::from_secs(3.0));
        assert_eq!(clock.ticks(), 181);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b.since(a) >= 0.0);
    }
}
