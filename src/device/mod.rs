//! The Toptek PA as seen through its switch interface.
//!
//! `Toptek` owns the link session for the lifetime of the device and is the
//! only way to reach it. The operations are grouped by concern, each in its
//! own `impl Toptek` block:
//!
//! - `actuator`: hold, release and press switches; remote key control
//! - `decoder`: read the LED and switch registers into snapshots
//! - `stabilizer`: read the bargraph while it is flashing
//! - `power`: read and step the TX power setting
//! - `toggles`: verified on/off for PA, LNA, SSB and DA
//! - `info`: one-line human readable summary
//!
//! Everything is blocking and strictly sequential; waits are explicit sleeps
//! on the injected `Clock`, tuned by `Timings`.

mod actuator;
mod decoder;
mod info;
mod power;
mod stabilizer;
mod toggles;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Timings, ToptekResult};
use crate::link::LinkSession;
use crate::ports::{Clock, SerialConnection};

/// A connected Toptek PA.
pub struct Toptek {
    link: LinkSession,
    clock: Arc<dyn Clock>,
    timings: Timings,
}

impl Toptek {
    /// Take ownership of an open connection and perform the banner handshake.
    pub fn new(
        serial: Box<dyn SerialConnection>,
        clock: Arc<dyn Clock>,
        timings: Timings,
    ) -> ToptekResult<Self> {
        let link = LinkSession::open(serial, Arc::clone(&clock), &timings)?;
        log::info!("Connected to Toptek switch interface");
        Ok(Self {
            link,
            clock,
            timings,
        })
    }

    fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration);
    }
}
