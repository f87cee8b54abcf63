//! Wire layer for the Toptek switch interface.
//!
//! This module separates the three concerns of talking to the interface:
//! - `encode`: translate Command → wire string (pure, no I/O)
//! - `decode`: translate answer lines → register values (pure, no I/O)
//! - `session`: own the serial port, drive echo checking, line framing and timing
//!
//! The interface echoes every command back as its own line before anything
//! else; read commands then send one more line carrying the value.

pub mod decode;
pub mod encode;
pub mod session;

pub use decode::{expect_reply, parse_decimal, parse_hex};
pub use encode::encode;
pub use session::LinkSession;

use crate::domain::Switch;

/// First line the interface prints after it boots
pub const BANNER: &str = "Toptek Switch Interface";

/// Answer to `EN`
pub const REMOTE_ENABLED: &str = "Remote keys enabled";

/// Answer to `DS`
pub const REMOTE_DISABLED: &str = "Remote keys disabled";

/// Commands understood by the switch interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `S<n>`: hold the switch down until released
    HoldOn(Switch),
    /// `U<n>`: release a held switch
    HoldOff(Switch),
    /// `P<n>`: press for exactly one keyboard scan cycle
    Press(Switch),
    /// `R<n>`: read one switch
    ReadSwitch(Switch),
    /// `RS`: read the status register (DA SWR flag, or switch bits; see
    /// `Toptek::get_switch_state`)
    ReadStatus,
    /// `RA`: read the 12-bit LED register, answered in hex
    ReadLeds,
    /// `EN`: enable remote key presses (front panel locked out)
    EnableRemote,
    /// `DS`: disable remote key presses
    DisableRemote,
}
