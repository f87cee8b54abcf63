//! Serial port adapter using the `serialport` crate
//!
//! Implements `SerialFactory` and `SerialConnection`. The device node is
//! checked for read/write access before the port is opened so a permissions
//! problem is reported as such instead of as an opaque open failure.

use std::io::{self, ErrorKind};
use std::path::Path;
use std::time::Duration;

use crate::domain::{ToptekError, ToptekResult};
use crate::ports::{SerialConnection, SerialFactory};

/// Fail unless `path` exists and the current user may read and write it.
///
/// Only asks the kernel for permission; the node is not opened, since every
/// open resets the interface's microcontroller.
pub fn check_device_access(path: &Path) -> ToptekResult<()> {
    if !path.exists() {
        return Err(ToptekError::Serial(format!(
            "Device {} does not exist",
            path.display()
        )));
    }
    read_write_access(path).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => ToptekError::Serial(format!(
            "Unable to acquire read/write permissions on {}. \
             Please change permissions, or run as superuser.",
            path.display()
        )),
        _ => ToptekError::Serial(format!("Cannot access {}: {e}", path.display())),
    })
}

#[cfg(unix)]
fn read_write_access(path: &Path) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))?;
    let ret = unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::W_OK) };
    if ret == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn read_write_access(path: &Path) -> io::Result<()> {
    let meta = std::fs::metadata(path)?;
    if meta.permissions().readonly() {
        return Err(io::Error::from(ErrorKind::PermissionDenied));
    }
    Ok(())
}

/// Zero-sized factory for creating serial port connections.
pub struct SerialPortFactory;

impl SerialFactory for SerialPortFactory {
    fn open(
        path: &str,
        baud_rate: u32,
        read_timeout: Duration,
    ) -> ToptekResult<Box<dyn SerialConnection>> {
        check_device_access(Path::new(path))?;

        let serial = serialport::new(path, baud_rate)
            .timeout(read_timeout)
            .open()
            .map_err(|e| ToptekError::Serial(format!("Failed to open {path}: {e}")))?;
        log::info!("Opened {path} at {baud_rate} baud");

        Ok(Box::new(SerialPortConnection {
            port: serial,
            connected: true,
        }))
    }
}

/// An open serial port connection wrapping the `serialport` crate.
pub struct SerialPortConnection {
    port: Box<dyn serialport::SerialPort>,
    connected: bool,
}

impl SerialConnection for SerialPortConnection {
    fn write(&mut self, data: &[u8]) -> ToptekResult<usize> {
        use std::io::Write;
        self.port
            .write_all(data)
            .and_then(|_| self.port.flush())
            .map(|_| data.len())
            .map_err(|e| ToptekError::Serial(format!("Write failed: {e}")))
    }

    fn read(&mut self, buffer: &mut [u8]) -> ToptekResult<usize> {
        use std::io::Read;
        match self.port.read(buffer) {
            Ok(n) => Ok(n),
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => Ok(0),
            Err(e) => Err(ToptekError::Serial(format!("Read failed: {e}"))),
        }
    }

    fn close(&mut self) -> ToptekResult<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
