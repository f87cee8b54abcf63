//! Command line front end
//!
//! Parses the CLI, opens the PA (real or simulated), and dispatches one
//! subcommand. Snapshots are printed as pretty JSON, everything else as text.

mod connect;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::device::Toptek;
use crate::domain::{DeviceConfig, Switch, ToptekError, ToptekResult};

pub use connect::{mock_requested, open_device, MOCK_ENV};

/// TX power the `up` routine leaves the PA at
const UP_POWER_WATTS: u32 = 40;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a Toptek PA through its switch interface", long_about = None)]
pub struct Cli {
    /// JSON device profile
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Serial device node, overrides the profile
    #[arg(short, long)]
    pub port: Option<String>,
    /// Log wire traffic
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Subcmd>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Subcmd {
    /// Turn on LNA, PA and DA, set 40 W and print a summary (default)
    Up,
    /// Print a one-line summary of the PA
    Info,
    /// Print the LED snapshot
    State,
    /// Print the switch snapshot
    Switches,
    /// Transmit power amplifier
    Pa { setting: Setting },
    /// Receive low noise amplifier
    Lna { setting: Setting },
    /// SSB mode (PA must be on)
    Ssb { setting: Setting },
    /// Driver amplifier enable
    Da { setting: Setting },
    /// Driver amplifier enable, without reading back
    DaFast { setting: Setting },
    /// TX power setting and output power
    Power {
        #[command(subcommand)]
        action: PowerAction,
    },
    /// SWR shown on the bargraph (needs SHOW SWR mode, see `press show-swr`)
    Swr,
    /// Faults shown on the red bargraph
    Errors,
    /// Lock or unlock the front panel keys
    Remote { action: RemoteAction },
    /// Press a front panel switch once
    Press { switch: SwitchArg },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PowerAction {
    /// Read the power setting (0 when the PA is off)
    Get,
    /// Step the power setting to 20, 40, 60 or 80 W
    Set { watts: u32 },
    /// Read the output power
    Current,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Setting {
    On,
    Off,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RemoteAction {
    Enable,
    Disable,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SwitchArg {
    SsbOn,
    TxPa,
    SetPwr,
    RxLna,
    ShowSwr,
    DaEn,
}

impl From<SwitchArg> for Switch {
    fn from(arg: SwitchArg) -> Switch {
        match arg {
            SwitchArg::SsbOn => Switch::SsbOn,
            SwitchArg::TxPa => Switch::TxPa,
            SwitchArg::SetPwr => Switch::SetPwr,
            SwitchArg::RxLna => Switch::RxLna,
            SwitchArg::ShowSwr => Switch::ShowSwr,
            SwitchArg::DaEn => Switch::DaEn,
        }
    }
}

impl Cli {
    /// Profile from `--config` (or defaults), with `--port` applied on top.
    pub fn device_config(&self) -> ToptekResult<DeviceConfig> {
        let mut config = match &self.config {
            Some(path) => DeviceConfig::load(path)?,
            None => DeviceConfig::default(),
        };
        if let Some(port) = &self.port {
            config.port = port.clone();
        }
        Ok(config)
    }
}

/// Open the PA described by `cli` and run its subcommand.
pub fn run(cli: &Cli) -> ToptekResult<()> {
    let config = cli.device_config()?;
    let mut pa = open_device(&config, mock_requested())?;
    let command = cli.command.clone().unwrap_or(Subcmd::Up);
    for line in execute(&mut pa, &command)? {
        println!("{line}");
    }
    Ok(())
}

/// Run one subcommand against an open PA, returning the lines to print.
pub fn execute(pa: &mut Toptek, command: &Subcmd) -> ToptekResult<Vec<String>> {
    let out = match command {
        Subcmd::Up => {
            pa.lna_on()?;
            pa.pa_on()?;
            pa.da_on()?;
            pa.set_tx_power(UP_POWER_WATTS)?;
            vec![pa.info()?]
        }
        Subcmd::Info => vec![pa.info()?],
        Subcmd::State => vec![to_json(&pa.get_state()?)?],
        Subcmd::Switches => vec![to_json(&pa.get_switch_state()?)?],
        Subcmd::Pa { setting } => {
            match setting {
                Setting::On => pa.pa_on()?,
                Setting::Off => pa.pa_off()?,
            }
            vec![]
        }
        Subcmd::Lna { setting } => {
            match setting {
                Setting::On => pa.lna_on()?,
                Setting::Off => pa.lna_off()?,
            }
            vec![]
        }
        Subcmd::Ssb { setting } => {
            match setting {
                Setting::On => pa.ssb_on()?,
                Setting::Off => pa.ssb_off()?,
            }
            vec![]
        }
        Subcmd::Da { setting } => {
            match setting {
                Setting::On => pa.da_on()?,
                Setting::Off => pa.da_off()?,
            }
            vec![]
        }
        Subcmd::DaFast { setting } => {
            match setting {
                Setting::On => pa.da_on_fast()?,
                Setting::Off => pa.da_off_fast()?,
            }
            vec![]
        }
        Subcmd::Power { action } => match action {
            PowerAction::Get => vec![format!("{}W", pa.get_tx_power()?)],
            PowerAction::Set { watts } => {
                pa.set_tx_power(*watts)?;
                vec![format!("{watts}W")]
            }
            PowerAction::Current => vec![format!("{}W", pa.get_cur_power()?)],
        },
        Subcmd::Swr => vec![format!("{:.1}", pa.get_swr()?)],
        Subcmd::Errors => pa
            .get_errors()?
            .into_iter()
            .map(|fault| fault.to_string())
            .collect(),
        Subcmd::Remote { action } => {
            match action {
                RemoteAction::Enable => pa.enable_remote()?,
                RemoteAction::Disable => pa.disable_remote()?,
            }
            vec![]
        }
        Subcmd::Press { switch } => {
            pa.press(Switch::from(*switch))?;
            vec![]
        }
    };
    Ok(out)
}

fn to_json<T: Serialize>(value: &T) -> ToptekResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ToptekError::Protocol(format!("Serialization error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_up() {
        let cli = Cli::try_parse_from(["toptek"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn parses_toggles_and_power() {
        let cli = Cli::try_parse_from(["toptek", "-p", "/dev/ttyACM0", "pa", "on"]).unwrap();
        assert_eq!(cli.command, Some(Subcmd::Pa { setting: Setting::On }));
        assert_eq!(cli.device_config().unwrap().port, "/dev/ttyACM0");

        let cli = Cli::try_parse_from(["toptek", "power", "set", "60"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Subcmd::Power {
                action: PowerAction::Set { watts: 60 }
            })
        );

        let cli = Cli::try_parse_from(["toptek", "press", "set-pwr"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Subcmd::Press {
                switch: SwitchArg::SetPwr
            })
        );
    }

    #[test]
    fn rejects_unknown_setting() {
        assert!(Cli::try_parse_from(["toptek", "lna", "maybe"]).is_err());
    }

    #[test]
    fn port_flag_overrides_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pa.json");
        std::fs::write(&path, r#"{"port": "/dev/ttyUSB7", "baud_rate": 9600}"#).unwrap();

        let config_arg = path.to_str().unwrap();
        let cli = Cli::try_parse_from(["toptek", "-c", config_arg, "info"]).unwrap();
        let config = cli.device_config().unwrap();
        assert_eq!(config.port, "/dev/ttyUSB7");
        assert_eq!(config.baud_rate, 9600);

        let cli =
            Cli::try_parse_from(["toptek", "-c", config_arg, "-p", "/dev/ttyS0", "info"]).unwrap();
        assert_eq!(cli.device_config().unwrap().port, "/dev/ttyS0");
    }
}
