//! Toptek PA remote control
//!
//! Drives a Toptek power amplifier through a small serial "switch interface"
//! that presses its front panel keys and reads back its LEDs.
//!
//! ## Architecture (Hexagonal / Ports & Adapters)
//!
//! - `domain/` - Pure domain types, no I/O dependencies
//! - `ports/` - Trait definitions for the serial line and the clock
//! - `link/` - Wire protocol: encode, decode, echo-checked session
//! - `device/` - The `Toptek` device: actuation, state decoding, power, toggles
//! - `adapters/` - Implementations of ports (serialport, system/simulated clock, simulator)
//! - `commands/` - Command line front end

// Core domain (pure, no I/O)
pub mod domain;
pub mod ports;

// Protocol and device logic
pub mod device;
pub mod link;

// Adapters (external I/O)
pub mod adapters;

// CLI
pub mod commands;

pub use device::Toptek;
