//! Verified on/off for PA, LNA, SSB and DA.
//!
//! Each toggle reads first and does nothing when already at the target, so
//! calling one twice never double-presses. After acting it reads again and
//! fails if the PA did not follow.

use crate::domain::{LedState, Switch, ToptekError, ToptekResult};

use super::Toptek;

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

impl Toptek {
    pub fn pa_on(&mut self) -> ToptekResult<()> {
        self.toggle_led(Switch::TxPa, "PA", true, |s| s.tx_pa)
    }

    pub fn pa_off(&mut self) -> ToptekResult<()> {
        self.toggle_led(Switch::TxPa, "PA", false, |s| s.tx_pa)
    }

    pub fn lna_on(&mut self) -> ToptekResult<()> {
        self.toggle_led(Switch::RxLna, "LNA", true, |s| s.lna_on)
    }

    pub fn lna_off(&mut self) -> ToptekResult<()> {
        self.toggle_led(Switch::RxLna, "LNA", false, |s| s.lna_on)
    }

    /// Turn SSB mode on. Only possible with the PA on; otherwise a warning
    /// is logged and nothing is sent.
    pub fn ssb_on(&mut self) -> ToptekResult<()> {
        self.toggle_ssb(true)
    }

    /// Turn SSB mode off. Same PA-on precondition as [`Toptek::ssb_on`].
    pub fn ssb_off(&mut self) -> ToptekResult<()> {
        self.toggle_ssb(false)
    }

    pub fn da_on(&mut self) -> ToptekResult<()> {
        self.toggle_da(true)
    }

    pub fn da_off(&mut self) -> ToptekResult<()> {
        self.toggle_da(false)
    }

    /// Hold DA enable without reading anything back.
    pub fn da_on_fast(&mut self) -> ToptekResult<()> {
        self.switch_on(Switch::DaEn)
    }

    /// Release DA enable without reading anything back.
    pub fn da_off_fast(&mut self) -> ToptekResult<()> {
        self.switch_off(Switch::DaEn)
    }

    fn toggle_ssb(&mut self, target: bool) -> ToptekResult<()> {
        let state = self.get_state()?;
        if !state.tx_pa {
            log::warn!("Cannot turn {} SSB when PA not on", on_off(target));
            return Ok(());
        }
        self.toggle_led(Switch::SsbOn, "SSB", target, |s| s.ssb_on)
    }

    /// Press `switch` if the LED read by `lit` is not at `target`, then check it.
    fn toggle_led(
        &mut self,
        switch: Switch,
        name: &str,
        target: bool,
        lit: fn(&LedState) -> bool,
    ) -> ToptekResult<()> {
        let state = self.get_state()?;
        if lit(&state) == target {
            log::info!("{name} already {}", on_off(target));
            return Ok(());
        }

        log::info!("Turning {name} {}", on_off(target));
        self.press(switch)?;
        self.sleep(self.timings.toggle_settle());

        let state = self.get_state()?;
        if lit(&state) != target {
            return Err(ToptekError::Protocol(format!(
                "{name} not turned {}",
                on_off(target)
            )));
        }
        Ok(())
    }

    fn toggle_da(&mut self, target: bool) -> ToptekResult<()> {
        if self.get_switch_state()?.sw_da_on == target {
            log::info!("DA already {}", on_off(target));
            return Ok(());
        }

        log::info!("Turning DA {}", on_off(target));
        if target {
            self.switch_on(Switch::DaEn)?;
        } else {
            self.switch_off(Switch::DaEn)?;
        }

        if self.get_switch_state()?.sw_da_on != target {
            return Err(ToptekError::Protocol(format!(
                "DA not turned {}",
                on_off(target)
            )));
        }
        Ok(())
    }
}
