//! Core domain types
//!
//! Pure types with no I/O dependencies: the switches, the decoded LED and
//! switch snapshots, and the configuration that tunes protocol timing.

pub mod config;
pub mod error;
pub mod state;
pub mod types;

pub use config::*;
pub use error::*;
pub use state::*;
pub use types::*;
