//! Adapters: implementations of the port traits
//!
//! - `serial_port`: real serial device via the `serialport` crate
//! - `clock`: wall-clock and simulated time
//! - `mock_toptek`: in-memory switch interface + PA simulator

pub mod clock;
pub mod mock_toptek;
pub mod serial_port;
