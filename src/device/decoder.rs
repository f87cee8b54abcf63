//! Register reads.

use crate::domain::{LedState, Switch, SwitchState, ToptekResult};
use crate::link::{parse_decimal, parse_hex, Command};

use super::Toptek;

impl Toptek {
    /// Read the current state of the LEDs.
    ///
    /// `RS` carries the DA SWR flag in decimal; `RA` carries the 12 LED bits
    /// in hex.
    pub fn get_state(&mut self) -> ToptekResult<LedState> {
        let da_swr = self.read_decimal(Command::ReadStatus)?;
        let leds = self.read_hex(Command::ReadLeds)?;
        Ok(LedState::from_registers(leds, da_swr != 0))
    }

    /// Read the current state of all switches.
    ///
    /// Note that this decodes the `RS` answer as hex switch bits, while
    /// [`Toptek::get_state`] decodes the very same command as the decimal DA
    /// SWR flag. The interface firmware seen so far answers `RS` with the SWR
    /// flag only, so here every bit but `sw_show_swr` reads as clear. Both
    /// decodings are kept as-is until the firmware side is settled.
    pub fn get_switch_state(&mut self) -> ToptekResult<SwitchState> {
        let da_on = self.read_decimal(Command::ReadSwitch(Switch::DaEn))?;
        let switches = self.read_hex(Command::ReadStatus)?;
        Ok(SwitchState::from_registers(switches, da_on != 0))
    }

    fn read_decimal(&mut self, cmd: Command) -> ToptekResult<u32> {
        let line = self.link.request(&cmd)?;
        parse_decimal(&line, &cmd)
    }

    fn read_hex(&mut self, cmd: Command) -> ToptekResult<u32> {
        let line = self.link.request(&cmd)?;
        parse_hex(&line, &cmd)
    }
}
