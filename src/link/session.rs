//! LinkSession: owns a serial connection and drives the echo protocol.
//!
//! Every command is written as bare ASCII, then the interface must echo it
//! back verbatim on its own line before the command counts as accepted.
//! Read commands follow the echo with one value line.
//!
//! Pure translation lives in `encode` / `decode`. LinkSession only handles I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Timings, ToptekError, ToptekResult};
use crate::ports::{Clock, SerialConnection};

use super::{encode, Command, BANNER};

/// Chunk size for each serial read call
const READ_CHUNK_SIZE: usize = 64;

/// Longest line the interface ever sends; anything longer means we lost framing
const MAX_LINE_LEN: usize = 256;

/// Owns a serial connection to the switch interface.
pub struct LinkSession {
    serial: Box<dyn SerialConnection>,
    clock: Arc<dyn Clock>,
    echo_delay: Duration,
    /// Bytes received past the last line terminator
    rx: Vec<u8>,
}

impl LinkSession {
    /// Take over a freshly opened connection and perform the handshake.
    ///
    /// Opening the port resets the microcontroller, so wait out its boot and
    /// then expect the banner as the first line.
    pub fn open(
        serial: Box<dyn SerialConnection>,
        clock: Arc<dyn Clock>,
        timings: &Timings,
    ) -> ToptekResult<Self> {
        let mut session = Self {
            serial,
            clock,
            echo_delay: timings.echo_delay(),
            rx: Vec::with_capacity(READ_CHUNK_SIZE),
        };
        session.clock.sleep(timings.boot_delay());
        let banner = session.receive_line()?;
        if banner != BANNER {
            return Err(ToptekError::Protocol(format!(
                "Invalid welcome message: '{banner}'"
            )));
        }
        log::debug!("Handshake complete");
        Ok(session)
    }

    /// Write `wire` and require the interface to echo it back exactly.
    pub fn send(&mut self, wire: &str) -> ToptekResult<()> {
        log::debug!("TX: {wire}");
        let written = self
            .serial
            .write(wire.as_bytes())
            .map_err(|e| ToptekError::Serial(format!("Command '{wire}' write failed: {e}")))?;
        if written != wire.len() {
            return Err(ToptekError::Serial(format!(
                "Command '{wire}' short write ({written} of {} bytes)",
                wire.len()
            )));
        }

        self.clock.sleep(self.echo_delay);

        let echo = self.receive_line()?;
        if echo != wire {
            return Err(ToptekError::Protocol(format!(
                "Invalid response from Toptek to '{wire}': '{echo}'"
            )));
        }
        Ok(())
    }

    /// Read one line, lossily decoded and trimmed.
    ///
    /// If the read times out before a terminator arrives, whatever was
    /// received so far is returned (possibly an empty string).
    pub fn receive_line(&mut self) -> ToptekResult<String> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        let raw = loop {
            if let Some(pos) = self.rx.iter().position(|&b| b == b'\n') {
                let rest = self.rx.split_off(pos + 1);
                break std::mem::replace(&mut self.rx, rest);
            }
            if self.rx.len() > MAX_LINE_LEN {
                let junk = String::from_utf8_lossy(&self.rx).into_owned();
                self.rx.clear();
                return Err(ToptekError::Protocol(format!(
                    "Line exceeds {MAX_LINE_LEN} bytes without terminator: '{junk}'"
                )));
            }
            let n = self.serial.read(&mut chunk)?;
            if n == 0 {
                // Timed out; hand back the partial line
                break std::mem::take(&mut self.rx);
            }
            self.rx.extend_from_slice(&chunk[..n]);
        };

        let line = String::from_utf8_lossy(&raw).trim().to_string();
        log::debug!("RX: {line}");
        Ok(line)
    }

    /// Send `wire`, then return the value line that follows the echo.
    pub fn query(&mut self, wire: &str) -> ToptekResult<String> {
        self.send(wire)?;
        self.receive_line()
    }

    /// Encode and send a command that has no value line.
    pub fn execute(&mut self, cmd: &Command) -> ToptekResult<()> {
        self.send(&encode(cmd))
    }

    /// Encode and send a read command, returning its value line.
    pub fn request(&mut self, cmd: &Command) -> ToptekResult<String> {
        self.query(&encode(cmd))
    }
}

impl Drop for LinkSession {
    fn drop(&mut self) {
        if let Err(e) = self.serial.close() {
            log::warn!("Failed to close serial connection: {e}");
        }
    }
}
