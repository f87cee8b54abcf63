//! Switch actuation.
//!
//! Three ways to work a switch, not interchangeable:
//! - hold (`S<n>`) / release (`U<n>`): sustained state, used for DA enable
//! - manual press: hold, wait, release; racy, see [`Toptek::press_manual`]
//! - automatic press (`P<n>`): the interface generates exactly one scan-cycle
//!   pulse; every higher-level flow uses this

use std::time::Duration;

use crate::domain::{Switch, ToptekResult};
use crate::link::{expect_reply, parse_decimal, Command, REMOTE_DISABLED, REMOTE_ENABLED};

use super::Toptek;

impl Toptek {
    /// Hold a switch down until [`Toptek::switch_off`].
    pub fn switch_on(&mut self, switch: Switch) -> ToptekResult<()> {
        self.link.execute(&Command::HoldOn(switch))
    }

    /// Release a held switch.
    pub fn switch_off(&mut self, switch: Switch) -> ToptekResult<()> {
        self.link.execute(&Command::HoldOff(switch))
    }

    /// Press a switch for `hold` (or the configured default), then release it.
    ///
    /// The interface's keyboard scan is slow enough that the switch can read
    /// as released for one scan cycle in the middle of the hold, which the PA
    /// sees as two presses. Prefer [`Toptek::press`].
    pub fn press_manual(&mut self, switch: Switch, hold: Option<Duration>) -> ToptekResult<()> {
        let hold = hold.unwrap_or_else(|| self.timings.manual_press());
        self.switch_on(switch)?;
        self.sleep(hold);
        self.switch_off(switch)
    }

    /// Press a switch for exactly one scan cycle, then give the PA time to
    /// act on it before anything else is read.
    pub fn press(&mut self, switch: Switch) -> ToptekResult<()> {
        self.link.execute(&Command::Press(switch))?;
        self.sleep(self.timings.press_settle());
        Ok(())
    }

    /// Current position of a single switch.
    pub fn get_switch(&mut self, switch: Switch) -> ToptekResult<bool> {
        let cmd = Command::ReadSwitch(switch);
        let line = self.link.request(&cmd)?;
        Ok(parse_decimal(&line, &cmd)? != 0)
    }

    /// Enable remote key presses. While enabled the front panel is locked out.
    pub fn enable_remote(&mut self) -> ToptekResult<()> {
        let cmd = Command::EnableRemote;
        let line = self.link.request(&cmd)?;
        expect_reply(&line, REMOTE_ENABLED, &cmd)?;
        log::info!("Enabled remote control of PA");
        Ok(())
    }

    /// Disable remote key presses so the front panel can be used by hand.
    pub fn disable_remote(&mut self) -> ToptekResult<()> {
        let cmd = Command::DisableRemote;
        let line = self.link.request(&cmd)?;
        expect_reply(&line, REMOTE_DISABLED, &cmd)?;
        log::info!("Disabled remote control of PA");
        Ok(())
    }
}
