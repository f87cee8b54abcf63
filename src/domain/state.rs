//! LED and switch snapshots decoded from the switch interface registers.
//!
//! Both snapshots are plain values: built once per read, never mutated.

use serde::{Deserialize, Serialize};

use super::{Fault, ToptekError, ToptekResult};

/// Bargraph readings for `led_10` .. `led_80`, lowest first.
const POWER_LADDER: [u8; 8] = [10, 20, 30, 40, 50, 60, 70, 80];
const SWR_LADDER: [f64; 8] = [1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9];

/// SWR reported when no ladder LED is lit
pub const NOMINAL_SWR: f64 = 1.0;

fn bit(reg: u32, n: u32) -> bool {
    reg & (1 << n) != 0
}

/// State of the front panel LEDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedState {
    pub led_10: bool,
    pub led_20: bool,
    pub led_30: bool,
    pub led_40: bool,
    pub led_50: bool,
    pub led_60: bool,
    pub led_70: bool,
    pub led_80: bool,
    /// Bargraph is red: it shows faults (or SWR) instead of power
    pub red_en: bool,
    pub lna_on: bool,
    pub tx_pa: bool,
    pub ssb_on: bool,
    /// Driver amplifier reports high SWR (separate register)
    pub da_swr: bool,
}

impl LedState {
    /// Decode the 12-bit LED register (`RA`, bit 0 = `led_10`) and the DA SWR flag.
    pub fn from_registers(leds: u32, da_swr: bool) -> Self {
        Self {
            led_10: bit(leds, 0),
            led_20: bit(leds, 1),
            led_30: bit(leds, 2),
            led_40: bit(leds, 3),
            led_50: bit(leds, 4),
            led_60: bit(leds, 5),
            led_70: bit(leds, 6),
            led_80: bit(leds, 7),
            red_en: bit(leds, 8),
            lna_on: bit(leds, 9),
            tx_pa: bit(leds, 10),
            ssb_on: bit(leds, 11),
            da_swr,
        }
    }

    /// Inverse of [`LedState::from_registers`] for the LED register.
    pub fn led_register(&self) -> u32 {
        let flags = [
            self.led_10,
            self.led_20,
            self.led_30,
            self.led_40,
            self.led_50,
            self.led_60,
            self.led_70,
            self.led_80,
            self.red_en,
            self.lna_on,
            self.tx_pa,
            self.ssb_on,
        ];
        flags
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .fold(0u32, |reg, (i, _)| reg | (1u32 << i))
    }

    /// Ladder LEDs, `led_10` first.
    pub fn ladder(&self) -> [bool; 8] {
        [
            self.led_10,
            self.led_20,
            self.led_30,
            self.led_40,
            self.led_50,
            self.led_60,
            self.led_70,
            self.led_80,
        ]
    }

    /// Index of the highest lit ladder LED; only that one is authoritative.
    fn top_of_ladder(&self) -> Option<usize> {
        self.ladder().iter().rposition(|&on| on)
    }

    /// Power in watts shown on the bargraph, 0 when dark.
    pub fn power(&self) -> ToptekResult<u8> {
        if self.red_en {
            return Err(ToptekError::Protocol(
                "Red LEDs are on, unable to get power".into(),
            ));
        }
        Ok(self.top_of_ladder().map_or(0, |i| POWER_LADDER[i]))
    }

    pub fn swr(&self) -> f64 {
        self.top_of_ladder().map_or(NOMINAL_SWR, |i| SWR_LADDER[i])
    }

    /// Faults shown on the red bargraph.
    ///
    /// In red mode the lower five LEDs are active-low: an unlit LED is a fault.
    pub fn errors(&self) -> ToptekResult<Vec<Fault>> {
        if !self.red_en {
            return Err(ToptekError::Protocol("No error apparent!".into()));
        }
        let ladder = self.ladder();
        Ok(Fault::ALL
            .iter()
            .zip(ladder.iter())
            .filter(|&(_, &lit)| !lit)
            .map(|(&fault, _)| fault)
            .collect())
    }

    pub fn any_on(&self) -> bool {
        self.ladder().iter().any(|&on| on)
    }
}

/// Positions of the remotely held switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchState {
    pub sw_ssb_on: bool,
    pub sw_tx_pa: bool,
    pub sw_set_pwr: bool,
    pub sw_rx_lna: bool,
    pub sw_show_swr: bool,
    pub sw_da_on: bool,
}

impl SwitchState {
    /// Decode the switch register and the separately read DA enable switch.
    pub fn from_registers(switches: u32, da_on: bool) -> Self {
        Self {
            sw_ssb_on: bit(switches, 4),
            sw_tx_pa: bit(switches, 5),
            sw_set_pwr: bit(switches, 2),
            sw_rx_lna: bit(switches, 3),
            sw_show_swr: bit(switches, 0),
            sw_da_on: da_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_EN: u32 = 1 << 8;

    #[test]
    fn register_bits_map_in_documented_order() {
        let names = [
            "led_10", "led_20", "led_30", "led_40", "led_50", "led_60", "led_70", "led_80",
            "red_en", "lna_on", "tx_pa", "ssb_on",
        ];
        for (i, name) in names.iter().enumerate() {
            let s = LedState::from_registers(1 << i, false);
            assert_eq!(s.led_register(), 1 << i, "bit {i} ({name}) did not round trip");
        }
        let s = LedState::from_registers(1 << 10, false);
        assert!(s.tx_pa && !s.lna_on && !s.ssb_on && !s.red_en);
        let s = LedState::from_registers(1 << 9, true);
        assert!(s.lna_on && s.da_swr);
    }

    #[test]
    fn upper_register_bits_are_ignored() {
        let s = LedState::from_registers(0xF000, false);
        assert_eq!(s, LedState::default());
    }

    #[test]
    fn power_and_swr_for_single_lit_led() {
        for i in 0..8 {
            let s = LedState::from_registers(1 << i, false);
            assert_eq!(s.power().unwrap(), POWER_LADDER[i]);
            assert_eq!(s.swr(), SWR_LADDER[i]);
            assert!(s.any_on());
        }
    }

    #[test]
    fn dark_bargraph() {
        let s = LedState::from_registers(0, false);
        assert_eq!(s.power().unwrap(), 0);
        assert_eq!(s.swr(), NOMINAL_SWR);
        assert!(!s.any_on());
    }

    #[test]
    fn highest_lit_led_wins() {
        // thermometer 10..50
        let s = LedState::from_registers(0b0001_1111, false);
        assert_eq!(s.power().unwrap(), 50);
        assert_eq!(s.swr(), 1.6);
        let s = LedState::from_registers(0b1000_0001, false);
        assert_eq!(s.power().unwrap(), 80);
    }

    #[test]
    fn power_fails_when_red() {
        for ladder in 0..=0xFFu32 {
            let s = LedState::from_registers(ladder | RED_EN, false);
            assert!(s.power().unwrap_err().is_protocol(), "ladder {ladder:#x}");
        }
    }

    #[test]
    fn errors_fail_when_not_red() {
        for ladder in 0..=0xFFu32 {
            let s = LedState::from_registers(ladder, false);
            assert!(s.errors().is_err(), "ladder {ladder:#x}");
        }
    }

    #[test]
    fn errors_are_active_low_in_ladder_order() {
        for bits in 0..32u32 {
            let s = LedState::from_registers(bits | RED_EN, false);
            let expected: Vec<Fault> = Fault::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| bits & (1 << i) == 0)
                .map(|(_, &f)| f)
                .collect();
            assert_eq!(s.errors().unwrap(), expected, "bits {bits:05b}");
        }
    }

    #[test]
    fn errors_ignore_upper_ladder() {
        let s = LedState::from_registers(0b1110_0000 | 0b1_1111 | RED_EN, false);
        assert!(s.errors().unwrap().is_empty());
    }

    #[test]
    fn switch_register_layout() {
        let s = SwitchState::from_registers(0b0001_0000, false);
        assert!(s.sw_ssb_on && !s.sw_tx_pa);
        let s = SwitchState::from_registers(0b0010_0000, false);
        assert!(s.sw_tx_pa);
        let s = SwitchState::from_registers(0b0000_0100, false);
        assert!(s.sw_set_pwr);
        let s = SwitchState::from_registers(0b0000_1000, false);
        assert!(s.sw_rx_lna);
        let s = SwitchState::from_registers(0b0000_0001, true);
        assert!(s.sw_show_swr && s.sw_da_on);
        // bit 1 is not wired to anything
        assert_eq!(SwitchState::from_registers(0b10, false), SwitchState::default());
    }
}
