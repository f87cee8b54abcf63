//! Human readable PA summary

use crate::domain::{Fault, ToptekResult};

use super::Toptek;

impl Toptek {
    /// One-line summary of the PA state, for humans.
    ///
    /// Reads the power setting, which costs a `SET_PWR` press and a full
    /// bargraph window, unless SHOW SWR is set or the PA is in error.
    pub fn info(&mut self) -> ToptekResult<String> {
        let state = self.get_state()?;
        let switches = self.get_switch_state()?;

        let enabled = |on: bool| if on { "ENABLED" } else { "DISABLED" };
        let mut out = format!(
            "Toptek State: PA is {}, LNA is {}, SSB is {}, DA is {}",
            enabled(state.tx_pa),
            enabled(state.lna_on),
            enabled(state.ssb_on),
            if switches.sw_da_on { "ON" } else { "OFF" },
        );

        if state.da_swr {
            out.push_str(", DA is showing HIGH SWR");
        }

        if switches.sw_show_swr {
            out.push_str(", SHOW SWR mode is ENABLED (not implemented)");
            return Ok(out);
        }

        if state.red_en {
            let errors = self.get_errors()?;
            let names: Vec<&str> = errors.iter().map(|f| Fault::as_str(*f)).collect();
            out.push_str(&format!(", ERRORS: [{}]", names.join(", ")));
            return Ok(out);
        }

        let setting = self.get_tx_power()?;
        out.push_str(&format!(
            ", output power set at {setting}W, current power: {}W",
            state.power()?
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::mock_toptek::MockPanel;
    use crate::device::testing::connect;
    use crate::domain::{Fault, TxPower};

    #[test]
    fn info_with_everything_off() {
        let (mut pa, _, _, _) = connect(MockPanel::default());
        assert_eq!(
            pa.info().unwrap(),
            "Toptek State: PA is DISABLED, LNA is DISABLED, SSB is DISABLED, DA is OFF, \
             output power set at 0W, current power: 0W"
        );
    }

    #[test]
    fn info_reports_setting_and_output() {
        let panel = MockPanel {
            pa_on: true,
            lna_on: true,
            da_on: true,
            setting: TxPower::new(40).unwrap(),
            output_power: 30,
            ..MockPanel::default()
        };
        let (mut pa, _, _, _) = connect(panel);
        assert_eq!(
            pa.info().unwrap(),
            "Toptek State: PA is ENABLED, LNA is ENABLED, SSB is DISABLED, DA is ON, \
             output power set at 40W, current power: 30W"
        );
    }

    #[test]
    fn info_lists_errors_and_stops() {
        let panel = MockPanel {
            pa_on: true,
            faults: vec![Fault::HighTemp],
            ..MockPanel::default()
        };
        let (mut pa, _, log, _) = connect(panel);
        let info = pa.info().unwrap();
        assert!(info.contains("DA is OFF"), "{info}");
        assert!(info.ends_with(", ERRORS: [HIGH TEMP]"), "{info}");
        assert!(!log.lock().unwrap().iter().any(|c| c == "P3"));
    }

    // RS carries the DA SWR flag, which the switch decoding reads as SHOW SWR
    #[test]
    fn da_swr_flag_stops_the_summary() {
        let panel = MockPanel {
            da_swr: true,
            ..MockPanel::default()
        };
        let (mut pa, _, _, _) = connect(panel);
        assert_eq!(
            pa.info().unwrap(),
            "Toptek State: PA is DISABLED, LNA is DISABLED, SSB is DISABLED, DA is OFF, \
             DA is showing HIGH SWR, SHOW SWR mode is ENABLED (not implemented)"
        );
    }
}
