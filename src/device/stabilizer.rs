//! Reading the bargraph while it flashes.
//!
//! After a `SET_PWR` press (or while faults are shown) the bargraph blinks for
//! a while, so a single read may catch it dark. Poll until something lights,
//! then wait out the rest of the flashing window and take that read as final.

use std::time::Duration;

use crate::domain::{LedState, ToptekResult};

use super::Toptek;

impl Toptek {
    /// Poll the LEDs every `flashy_poll` for up to `flashy_window`.
    ///
    /// Returns the first read with a lit ladder LED, after sleeping out the
    /// remainder of the window, or the last (dark) read if nothing lit up.
    /// Either way the sleeps taken here add up to `flashy_window`.
    pub fn get_flashy_bargraph(&mut self) -> ToptekResult<LedState> {
        let poll = self.timings.flashy_poll();
        let window = self.timings.flashy_window();
        let polls = poll_count(window, poll);

        let mut waited = Duration::ZERO;
        let mut state = LedState::default();
        for i in 0..polls {
            self.sleep(poll);
            waited += poll;
            state = self.get_state()?;
            if state.any_on() {
                log::debug!("Bargraph lit on poll {i}, settling");
                self.sleep(window.saturating_sub(waited));
                return Ok(state);
            }
        }
        self.sleep(window.saturating_sub(waited));
        log::debug!("Bargraph stayed dark for {window:?}");
        Ok(state)
    }
}

fn poll_count(window: Duration, poll: Duration) -> u128 {
    if poll.is_zero() {
        return 1;
    }
    (window.as_nanos() / poll.as_nanos()).max(1)
}
