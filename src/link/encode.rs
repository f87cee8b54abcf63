//! Pure encoding: Command → wire string.
//!
//! No terminator is appended; the interface frames commands by length.

use super::Command;

pub fn encode(cmd: &Command) -> String {
    use Command::*;
    match cmd {
        HoldOn(sw) => format!("S{}", sw.code()),
        HoldOff(sw) => format!("U{}", sw.code()),
        Press(sw) => format!("P{}", sw.code()),
        ReadSwitch(sw) => format!("R{}", sw.code()),
        ReadStatus => "RS".into(),
        ReadLeds => "RA".into(),
        EnableRemote => "EN".into(),
        DisableRemote => "DS".into(),
    }
}
