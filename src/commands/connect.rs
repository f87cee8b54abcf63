//! Opening the PA, on hardware or in the simulator

use std::sync::Arc;

use crate::adapters::clock::SystemClock;
use crate::adapters::mock_toptek::MockToptek;
use crate::adapters::serial_port::SerialPortFactory;
use crate::device::Toptek;
use crate::domain::{DeviceConfig, ToptekResult};
use crate::ports::{Clock, SerialConnection, SerialFactory};

/// Set to `1` to talk to the built-in simulator instead of a serial port
pub const MOCK_ENV: &str = "TOPTEK_MOCK";

pub fn mock_requested() -> bool {
    std::env::var(MOCK_ENV).is_ok_and(|v| v == "1")
}

/// Open the configured port (or the simulator) and run the handshake.
pub fn open_device(config: &DeviceConfig, mock: bool) -> ToptekResult<Toptek> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let serial: Box<dyn SerialConnection> = if mock {
        log::info!("{MOCK_ENV}=1, using simulated PA");
        Box::new(MockToptek::new(Arc::clone(&clock)))
    } else {
        SerialPortFactory::open(&config.port, config.baud_rate, config.read_timeout())?
    };
    Toptek::new(serial, clock, config.timings.clone())
}
