//! Port traits (interfaces)
//!
//! These traits define the boundaries between the protocol core and external I/O.
//! Adapters implement these traits to connect to real hardware (or a simulator).

pub mod clock;
pub mod serial;

pub use clock::*;
pub use serial::*;
