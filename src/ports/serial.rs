//! Serial port traits
//!
//! Split into two traits:
//! - `SerialFactory`: opens a device node
//! - `SerialConnection`: instance methods for reading/writing data

use std::time::Duration;

use crate::domain::ToptekResult;

/// Factory for creating serial connections.
pub trait SerialFactory {
    /// Open the device node at `path`, returning a boxed connection.
    ///
    /// A read that sees no data within `read_timeout` returns `Ok(0)`.
    fn open(
        path: &str,
        baud_rate: u32,
        read_timeout: Duration,
    ) -> ToptekResult<Box<dyn SerialConnection>>;
}

/// Trait for an open serial port connection.
pub trait SerialConnection: Send {
    /// Write bytes to the port
    fn write(&mut self, data: &[u8]) -> ToptekResult<usize>;

    /// Read bytes from the port. `Ok(0)` means the read timed out.
    fn read(&mut self, buffer: &mut [u8]) -> ToptekResult<usize>;

    /// Close the connection
    fn close(&mut self) -> ToptekResult<()>;

    /// Check if the port is still connected
    fn is_connected(&self) -> bool;
}
