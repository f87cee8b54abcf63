//! Device configuration
//!
//! Timing constants are empirical: they match the switch interface's scan loop
//! and the PA's debounce/display behaviour. They are exposed here so test
//! doubles can shrink them and a JSON profile can override them.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ToptekError, ToptekResult};

/// Baud rate the switch interface firmware listens at
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Delays used by the protocol, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Between writing a command and reading its echo
    pub echo_delay_ms: u64,
    /// After opening the port; the microcontroller resets on open
    pub boot_delay_ms: u64,
    /// After an automatic (`P<n>`) press
    pub press_settle_ms: u64,
    /// Default hold time for a manual press
    pub manual_press_ms: u64,
    /// Between bargraph polls
    pub flashy_poll_ms: u64,
    /// How long the bargraph keeps flashing
    pub flashy_window_ms: u64,
    /// After the press that opens the power adjustment window
    pub power_open_settle_ms: u64,
    /// Between power adjustment presses
    pub power_step_ms: u64,
    /// After the last adjustment press, before verifying
    pub power_cooldown_ms: u64,
    /// After toggling PA, LNA or SSB
    pub toggle_settle_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            echo_delay_ms: 50,
            boot_delay_ms: 1000,
            press_settle_ms: 100,
            manual_press_ms: 200,
            flashy_poll_ms: 50,
            flashy_window_ms: 2000,
            power_open_settle_ms: 100,
            power_step_ms: 200,
            power_cooldown_ms: 2000,
            toggle_settle_ms: 500,
        }
    }
}

impl Timings {
    /// No waiting at all, for test doubles that answer instantly.
    ///
    /// The flashy poll interval stays non-zero so the bargraph poll count is
    /// still bounded by the window.
    pub fn zero() -> Self {
        Self {
            echo_delay_ms: 0,
            boot_delay_ms: 0,
            press_settle_ms: 0,
            manual_press_ms: 0,
            flashy_poll_ms: 1,
            flashy_window_ms: 10,
            power_open_settle_ms: 0,
            power_step_ms: 0,
            power_cooldown_ms: 0,
            toggle_settle_ms: 0,
        }
    }

    pub fn echo_delay(&self) -> Duration {
        Duration::from_millis(self.echo_delay_ms)
    }

    pub fn boot_delay(&self) -> Duration {
        Duration::from_millis(self.boot_delay_ms)
    }

    pub fn press_settle(&self) -> Duration {
        Duration::from_millis(self.press_settle_ms)
    }

    pub fn manual_press(&self) -> Duration {
        Duration::from_millis(self.manual_press_ms)
    }

    pub fn flashy_poll(&self) -> Duration {
        Duration::from_millis(self.flashy_poll_ms)
    }

    pub fn flashy_window(&self) -> Duration {
        Duration::from_millis(self.flashy_window_ms)
    }

    pub fn power_open_settle(&self) -> Duration {
        Duration::from_millis(self.power_open_settle_ms)
    }

    pub fn power_step(&self) -> Duration {
        Duration::from_millis(self.power_step_ms)
    }

    pub fn power_cooldown(&self) -> Duration {
        Duration::from_millis(self.power_cooldown_ms)
    }

    pub fn toggle_settle(&self) -> Duration {
        Duration::from_millis(self.toggle_settle_ms)
    }

    fn validate(&self) -> ToptekResult<()> {
        if self.flashy_poll_ms == 0 {
            return Err(ToptekError::Config(
                "flashy_poll_ms must be greater than zero".into(),
            ));
        }
        if self.flashy_window_ms < self.flashy_poll_ms {
            return Err(ToptekError::Config(
                "flashy_window_ms must be at least flashy_poll_ms".into(),
            ));
        }
        Ok(())
    }
}

/// A device profile: which port to open and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Path to the serial device node (e.g. `/dev/ttyUSB0`)
    pub port: String,
    pub baud_rate: u32,
    /// Upper bound on a single line read
    pub read_timeout_ms: u64,
    pub timings: Timings,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: 1000,
            timings: Timings::default(),
        }
    }
}

impl DeviceConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Load a profile from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> ToptekResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ToptekError::Config(format!("Failed to read config '{}': {e}", path.display()))
        })?;
        let config: DeviceConfig = serde_json::from_str(&json).map_err(|e| {
            ToptekError::Config(format!("Failed to parse config '{}': {e}", path.display()))
        })?;
        config.timings.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> ToptekResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ToptekError::Config(format!("Serialization error: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            ToptekError::Config(format!("Failed to write config '{}': {e}", path.display()))
        })
    }
}
