//! Clock adapters
//!
//! `SystemClock` really sleeps. `SimClock` only advances a shared counter, so a
//! full power adjustment (several seconds of settle delays) runs instantly in
//! tests while the device simulator still sees time pass.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::ports::Clock;

/// Wall-clock time and `std::thread::sleep`.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[derive(Default)]
struct SimTime {
    now: Duration,
    sleeps: Vec<Duration>,
}

/// Simulated time. Clones share the same timeline.
#[derive(Clone, Default)]
pub struct SimClock {
    inner: Arc<Mutex<SimTime>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every non-zero sleep requested so far, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock().sleeps.clone()
    }

    /// Move time forward without recording a sleep
    pub fn advance(&self, duration: Duration) {
        self.lock().now += duration;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimTime> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for SimClock {
    fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let mut time = self.lock();
        time.now += duration;
        time.sleeps.push(duration);
    }

    fn elapsed(&self) -> Duration {
        self.lock().now
    }
}
