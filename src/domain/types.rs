//! Core domain types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ToptekError, ToptekResult};

/// Front-panel switches reachable through the switch interface.
///
/// The discriminant is the code used on the wire (`S<n>`, `U<n>`, `P<n>`, `R<n>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Switch {
    SsbOn = 1,
    TxPa = 2,
    SetPwr = 3,
    RxLna = 4,
    ShowSwr = 5,
    DaEn = 6,
}

impl Switch {
    pub const ALL: [Switch; 6] = [
        Switch::SsbOn,
        Switch::TxPa,
        Switch::SetPwr,
        Switch::RxLna,
        Switch::ShowSwr,
        Switch::DaEn,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Switch::SsbOn => "SSB_ON",
            Switch::TxPa => "TX_PA",
            Switch::SetPwr => "SET_PWR",
            Switch::RxLna => "RX_LNA",
            Switch::ShowSwr => "SHOW_SWR",
            Switch::DaEn => "DA_EN",
        }
    }

    pub fn from_code(code: u8) -> Option<Switch> {
        Switch::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four TX power settings the PA can be stepped through.
///
/// `SET_PWR` advances 20 → 40 → 60 → 80 → 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TxPower(u8);

impl TxPower {
    pub const STEP_WATTS: u8 = 20;
    pub const MAX_WATTS: u8 = 80;
    pub const SETTINGS: [u8; 4] = [20, 40, 60, 80];
    /// Lowest setting, where the ladder wraps to
    pub const MIN: TxPower = TxPower(Self::STEP_WATTS);

    pub fn new(watts: u8) -> ToptekResult<Self> {
        Self::try_from(u32::from(watts))
    }

    pub fn watts(self) -> u8 {
        self.0
    }

    /// The setting reached after one more `SET_PWR` press.
    pub fn next(self) -> TxPower {
        if self.0 >= Self::MAX_WATTS {
            Self::MIN
        } else {
            TxPower(self.0 + Self::STEP_WATTS)
        }
    }

    /// Number of forward presses needed to move from `current` (as read off
    /// the bargraph, which may be 0 or an odd ladder value) to `self`.
    pub fn presses_from(self, current: u8) -> u32 {
        let target = u32::from(self.0);
        let current = u32::from(current);
        let step = u32::from(Self::STEP_WATTS);
        if current <= target {
            (target - current) / step
        } else {
            (u32::from(Self::MAX_WATTS).saturating_sub(current)) / step + target / step
        }
    }
}

impl TryFrom<u32> for TxPower {
    type Error = ToptekError;

    fn try_from(watts: u32) -> ToptekResult<Self> {
        Self::SETTINGS
            .iter()
            .find(|&&w| u32::from(w) == watts)
            .map(|&w| TxPower(w))
            .ok_or_else(|| {
                ToptekError::Value(format!(
                    "Invalid set power (got {watts}, needs to be 20, 40, 60, or 80)"
                ))
            })
    }
}

impl TryFrom<u8> for TxPower {
    type Error = ToptekError;

    fn try_from(watts: u8) -> ToptekResult<Self> {
        Self::try_from(u32::from(watts))
    }
}

impl From<TxPower> for u8 {
    fn from(p: TxPower) -> u8 {
        p.0
    }
}

impl fmt::Display for TxPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}W", self.0)
    }
}

/// Faults shown on the red bargraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fault {
    PaFail,
    HighTemp,
    DcVoltage,
    Overdrive,
    HighSwr,
}

impl Fault {
    /// In ladder order: `led_10` .. `led_50`.
    pub const ALL: [Fault; 5] = [
        Fault::PaFail,
        Fault::HighTemp,
        Fault::DcVoltage,
        Fault::Overdrive,
        Fault::HighSwr,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Fault::PaFail => "PA FAIL",
            Fault::HighTemp => "HIGH TEMP",
            Fault::DcVoltage => "DC VOLTAGE",
            Fault::Overdrive => "OVERDRIVE",
            Fault::HighSwr => "HIGH SWR",
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
