//! TX power: reading and stepping the setting, reading output power and faults.
//!
//! The setting is a ring 20 → 40 → 60 → 80 → 20 advanced by `SET_PWR`. The
//! first press only brings up the setting display; presses while it is up
//! advance the setting by one step.

use crate::domain::{Fault, Switch, ToptekError, ToptekResult, TxPower};

use super::Toptek;

impl Toptek {
    /// The power the PA is set to, or 0 when the PA is off.
    pub fn get_tx_power(&mut self) -> ToptekResult<u8> {
        let state = self.get_state()?;
        if !state.tx_pa {
            return Ok(0);
        }

        self.press(Switch::SetPwr)?;
        self.get_flashy_bargraph()?.power()
    }

    /// Step the power setting to `watts` (20, 40, 60 or 80) and verify it.
    pub fn set_tx_power(&mut self, watts: u32) -> ToptekResult<()> {
        let target = TxPower::try_from(watts)?;

        let state = self.get_state()?;
        if !state.tx_pa {
            return Err(ToptekError::Protocol("Cannot set power when PA off!".into()));
        }

        let current = self.get_tx_power()?;
        let presses = target.presses_from(current);
        if presses == 0 {
            log::info!("TX power already set to {target}");
            return Ok(());
        }
        log::info!("Setting TX power {current}W → {target} ({presses} presses)");

        // Bring up the setting display; this press does not count
        self.press(Switch::SetPwr)?;
        self.sleep(self.timings.power_open_settle());

        for _ in 0..presses {
            self.sleep(self.timings.power_step());
            self.press(Switch::SetPwr)?;
        }

        // Let the display time out so the verify press does not advance it
        self.sleep(self.timings.power_cooldown());

        let actual = self.get_tx_power()?;
        if actual != target.watts() {
            return Err(ToptekError::Protocol(format!(
                "Power not set correctly (got {actual}, wanted {watts})"
            )));
        }
        Ok(())
    }

    /// The power the PA is currently putting out.
    pub fn get_cur_power(&mut self) -> ToptekResult<u8> {
        let state = self.get_state()?;
        if !state.tx_pa {
            return Err(ToptekError::Protocol("Amplifier is not on!".into()));
        }
        if state.red_en {
            return Err(ToptekError::Protocol(
                "Amplifier in error or in check SWR mode".into(),
            ));
        }
        let power = state.power()?;
        log::info!("Current power is {power}W");
        Ok(power)
    }

    /// SWR shown on the bargraph in SHOW SWR mode.
    ///
    /// Outside that mode the ladder shows output power, so the read is refused
    /// unless the bargraph is red. Faults also turn it red; check
    /// [`Toptek::get_errors`] first when that matters.
    pub fn get_swr(&mut self) -> ToptekResult<f64> {
        let state = self.get_state()?;
        if !state.red_en {
            return Err(ToptekError::Protocol(
                "SWR is only shown in SHOW SWR mode".into(),
            ));
        }
        Ok(state.swr())
    }

    /// Faults currently shown on the red bargraph; empty when it is not red.
    pub fn get_errors(&mut self) -> ToptekResult<Vec<Fault>> {
        let state = self.get_state()?;
        if !state.red_en {
            return Ok(Vec::new());
        }
        self.get_flashy_bargraph()?.errors()
    }
}
