//! Time port
//!
//! Every wait in the protocol is an explicit fixed-duration sleep. Routing
//! them through this trait lets tests run the whole protocol on simulated time.

use std::time::Duration;

/// Source of sleeps and elapsed time.
pub trait Clock: Send + Sync {
    /// Block for `duration`
    fn sleep(&self, duration: Duration);

    /// Time since the clock was created
    fn elapsed(&self) -> Duration;
}
