//! Simulated switch interface + PA for development and testing without hardware.
//!
//! Activate from the CLI by setting TOPTEK_MOCK=1 in the environment:
//!
//!   TOPTEK_MOCK=1 RUST_LOG=toptek_lib=debug toptek info
//!
//! The simulator speaks the same wire protocol as the real interface
//! (banner, per-command echo, decimal/hex register answers) and models the
//! parts of the PA the driver depends on: toggling PA/LNA/SSB on a press, the
//! power setting display that opens on the first `SET_PWR` press and advances
//! on the following ones, the blank period before the bargraph lights, and the
//! active-low red fault ladder.
//!
//! Every press is logged at INFO level.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::{Fault, Switch, ToptekResult, TxPower};
use crate::link::{BANNER, REMOTE_DISABLED, REMOTE_ENABLED};
use crate::ports::{Clock, SerialConnection};

const UNHANDLED: &str = "Unhandled statement";

/// Observable and adjustable state of the simulated PA.
#[derive(Debug, Clone)]
pub struct MockPanel {
    pub pa_on: bool,
    pub lna_on: bool,
    pub ssb_on: bool,
    pub da_on: bool,
    pub da_swr: bool,
    pub show_swr: bool,
    pub setting: TxPower,
    /// Forward power shown on the bargraph while the setting display is closed
    pub output_power: u8,
    /// Active faults; any fault turns the bargraph red
    pub faults: Vec<Fault>,
    /// Switches whose presses have no effect
    pub stuck: Vec<Switch>,
    pub remote_enabled: bool,
    /// Echo every command back wrong
    pub corrupt_echo: bool,
    /// How long the setting display stays up after the last `SET_PWR` press
    pub display_window: Duration,
    /// Dark period after the setting display opens
    pub blink_off: Duration,
    /// Raw `RA` values returned before the model is consulted
    pub led_trace: VecDeque<u32>,
    /// Simulator bookkeeping; leave at its default
    pub runtime: PanelRuntime,
}

/// State the simulator tracks between commands.
#[derive(Debug, Clone, Default)]
pub struct PanelRuntime {
    /// Switch register as held by `S<n>` / `U<n>`, firmware bit layout
    held: u32,
    display_opened_at: Option<Duration>,
    last_set_pwr_at: Option<Duration>,
}

impl Default for MockPanel {
    fn default() -> Self {
        Self {
            pa_on: false,
            lna_on: false,
            ssb_on: false,
            da_on: false,
            da_swr: false,
            show_swr: false,
            setting: TxPower::MIN,
            output_power: 0,
            faults: Vec::new(),
            stuck: Vec::new(),
            remote_enabled: true,
            corrupt_echo: false,
            display_window: Duration::from_secs(2),
            blink_off: Duration::from_millis(300),
            led_trace: VecDeque::new(),
            runtime: PanelRuntime::default(),
        }
    }
}

/// Firmware bit position of a switch in the held-switch register.
fn held_bit(sw: Switch) -> Option<u32> {
    match sw {
        Switch::ShowSwr => Some(0),
        Switch::SetPwr => Some(2),
        Switch::RxLna => Some(3),
        Switch::SsbOn => Some(4),
        Switch::TxPa => Some(5),
        Switch::DaEn => None,
    }
}

/// LEDs 10..`watts` lit, as the bargraph draws a level.
fn thermometer(watts: u8) -> u32 {
    (1u32 << (watts / 10).min(8)) - 1
}

impl MockPanel {
    fn display_open(&self, now: Duration) -> bool {
        self.runtime.last_set_pwr_at
            .is_some_and(|t| now.saturating_sub(t) < self.display_window)
    }

    fn led_register(&mut self, now: Duration) -> u32 {
        if let Some(raw) = self.led_trace.pop_front() {
            return raw;
        }

        let red = !self.faults.is_empty() || self.show_swr;
        let ladder = if !self.faults.is_empty() {
            Fault::ALL
                .iter()
                .enumerate()
                .filter(|(_, f)| !self.faults.contains(f))
                .fold(0u32, |reg, (i, _)| reg | (1u32 << i))
        } else if self.show_swr || !self.pa_on {
            0
        } else if self.display_open(now) {
            let dark = self
                .runtime
                .display_opened_at
                .is_some_and(|t| now.saturating_sub(t) < self.blink_off);
            if dark {
                0
            } else {
                thermometer(self.setting.watts())
            }
        } else {
            thermometer(self.output_power)
        };

        ladder
            | u32::from(red) << 8
            | u32::from(self.lna_on) << 9
            | u32::from(self.pa_on) << 10
            | u32::from(self.ssb_on) << 11
    }

    fn press(&mut self, sw: Switch, now: Duration) {
        if !self.remote_enabled || self.stuck.contains(&sw) {
            log::info!("[MOCK TOPTEK] {sw} press ignored");
            return;
        }
        match sw {
            Switch::TxPa => self.pa_on = !self.pa_on,
            Switch::RxLna => self.lna_on = !self.lna_on,
            Switch::SsbOn => {
                if self.pa_on {
                    self.ssb_on = !self.ssb_on;
                }
            }
            Switch::ShowSwr => self.show_swr = !self.show_swr,
            Switch::SetPwr => {
                if self.pa_on {
                    if self.display_open(now) {
                        self.setting = self.setting.next();
                    } else {
                        self.runtime.display_opened_at = Some(now);
                    }
                    self.runtime.last_set_pwr_at = Some(now);
                }
            }
            Switch::DaEn => {}
        }
        log::info!(
            "[MOCK TOPTEK] {sw} pressed → PA={} LNA={} SSB={} setting={}",
            self.pa_on,
            self.lna_on,
            self.ssb_on,
            self.setting
        );
    }

    fn hold(&mut self, sw: Switch, on: bool, now: Duration) {
        if self.stuck.contains(&sw) {
            log::info!("[MOCK TOPTEK] {sw} hold ignored");
            return;
        }
        match held_bit(sw) {
            Some(bit) => {
                let was_held = self.runtime.held & (1 << bit) != 0;
                if on {
                    self.runtime.held |= 1 << bit;
                    if !was_held {
                        self.press(sw, now);
                    }
                } else {
                    self.runtime.held &= !(1 << bit);
                }
            }
            None => {
                self.da_on = on;
                log::info!("[MOCK TOPTEK] DA {}", if on { "ON" } else { "OFF" });
            }
        }
    }

    fn read_switch(&self, sw: Switch) -> u32 {
        match held_bit(sw) {
            Some(bit) => (self.runtime.held >> bit) & 1,
            None => u32::from(self.da_on),
        }
    }

    /// Answer lines for one two-character command, echo excluded.
    fn process(&mut self, command: u8, target: u8, now: Duration) -> Vec<String> {
        let switch = (target as char)
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Switch::from_code);

        match (command, target, switch) {
            (b'S', _, Some(sw)) => {
                self.hold(sw, true, now);
                vec![]
            }
            (b'U', _, Some(sw)) => {
                self.hold(sw, false, now);
                vec![]
            }
            (b'P', _, Some(sw)) => {
                self.press(sw, now);
                vec![]
            }
            (b'R', b'A', _) => vec![format!("{:X}", self.led_register(now))],
            (b'R', b'S', _) => vec![format!("{:X}", u32::from(self.da_swr))],
            (b'R', _, Some(sw)) => vec![format!("{:X}", self.read_switch(sw))],
            (b'E', b'N', _) => {
                self.remote_enabled = true;
                vec![REMOTE_ENABLED.to_string()]
            }
            (b'D', b'S', _) => {
                self.remote_enabled = false;
                vec![REMOTE_DISABLED.to_string()]
            }
            _ => vec![UNHANDLED.to_string()],
        }
    }
}

/// In-memory serial endpoint backed by a [`MockPanel`].
pub struct MockToptek {
    clock: Arc<dyn Clock>,
    panel: Arc<Mutex<MockPanel>>,
    log: Arc<Mutex<Vec<String>>>,
    command: Vec<u8>,
    pending: VecDeque<u8>,
    connected: bool,
}

impl MockToptek {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_panel(clock, MockPanel::default())
    }

    pub fn with_panel(clock: Arc<dyn Clock>, panel: MockPanel) -> Self {
        Self::with_banner(clock, panel, BANNER)
    }

    /// Boot with an arbitrary welcome line, to exercise the handshake.
    pub fn with_banner(clock: Arc<dyn Clock>, panel: MockPanel, banner: &str) -> Self {
        log::info!("[MOCK TOPTEK] Initialized");
        let mut mock = Self {
            clock,
            panel: Arc::new(Mutex::new(panel)),
            log: Arc::new(Mutex::new(Vec::new())),
            command: Vec::with_capacity(2),
            pending: VecDeque::new(),
            connected: true,
        };
        mock.println(banner);
        mock
    }

    /// Shared handle to the simulated panel, usable after the mock is boxed.
    pub fn panel(&self) -> Arc<Mutex<MockPanel>> {
        Arc::clone(&self.panel)
    }

    /// Shared log of every command received, in order.
    pub fn command_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.log)
    }

    fn println(&mut self, line: &str) {
        self.pending.extend(line.as_bytes());
        self.pending.extend(b"\r\n");
    }

    fn lock_panel(&self) -> MutexGuard<'_, MockPanel> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&mut self, command: u8, target: u8) {
        let wire = format!("{}{}", command as char, target as char);
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(wire.clone());

        let now = self.clock.elapsed();
        let (corrupt, lines) = {
            let mut panel = self.lock_panel();
            (panel.corrupt_echo, panel.process(command, target, now))
        };
        if corrupt {
            self.println(&wire.to_ascii_lowercase());
        } else {
            self.println(&wire);
        }
        for line in lines {
            self.println(&line);
        }
    }
}

impl SerialConnection for MockToptek {
    fn write(&mut self, data: &[u8]) -> ToptekResult<usize> {
        for &byte in data {
            if byte == b'\r' || byte == b'\n' {
                continue;
            }
            self.command.push(byte);
            if self.command.len() == 2 {
                let (command, target) = (self.command[0], self.command[1]);
                self.command.clear();
                self.dispatch(command, target);
            }
        }
        Ok(data.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> ToptekResult<usize> {
        let n = self.pending.len().min(buffer.len());
        for (slot, byte) in buffer.iter_mut().zip(self.pending.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn close(&mut self) -> ToptekResult<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::SimClock;

    fn exchange(mock: &mut MockToptek, wire: &str) -> String {
        mock.write(wire.as_bytes()).unwrap();
        let mut buf = [0u8; 256];
        let n = mock.read(&mut buf).unwrap();
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    fn booted() -> (MockToptek, SimClock) {
        let clock = SimClock::new();
        let mut mock = MockToptek::new(Arc::new(clock.clone()));
        let mut buf = [0u8; 64];
        let n = mock.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"Toptek Switch Interface\r\n");
        (mock, clock)
    }

    #[test]
    fn echoes_then_answers() {
        let (mut mock, _) = booted();
        assert_eq!(exchange(&mut mock, "RA"), "RA\r\n0\r\n");
        assert_eq!(exchange(&mut mock, "RS"), "RS\r\n0\r\n");
        assert_eq!(exchange(&mut mock, "P2"), "P2\r\n");
        assert_eq!(exchange(&mut mock, "RA"), "RA\r\n400\r\n");
    }

    #[test]
    fn remote_key_control_replies() {
        let (mut mock, _) = booted();
        assert_eq!(exchange(&mut mock, "DS"), "DS\r\nRemote keys disabled\r\n");
        exchange(&mut mock, "P2");
        assert!(!mock.panel().lock().unwrap().pa_on);
        assert_eq!(exchange(&mut mock, "EN"), "EN\r\nRemote keys enabled\r\n");
    }

    #[test]
    fn hold_sets_switch_register_and_da() {
        let (mut mock, _) = booted();
        exchange(&mut mock, "S6");
        assert_eq!(exchange(&mut mock, "R6"), "R6\r\n1\r\n");
        exchange(&mut mock, "S4");
        assert_eq!(exchange(&mut mock, "R4"), "R4\r\n1\r\n");
        assert!(mock.panel().lock().unwrap().lna_on);
        exchange(&mut mock, "U4");
        assert_eq!(exchange(&mut mock, "R4"), "R4\r\n0\r\n");
        // release does not toggle again
        assert!(mock.panel().lock().unwrap().lna_on);
    }

    #[test]
    fn set_power_display_opens_then_advances() {
        let (mut mock, clock) = booted();
        exchange(&mut mock, "P2");
        exchange(&mut mock, "P3");
        // dark while blinking
        assert_eq!(exchange(&mut mock, "RA"), "RA\r\n400\r\n");
        clock.advance(Duration::from_millis(400));
        assert_eq!(exchange(&mut mock, "RA"), "RA\r\n403\r\n");
        exchange(&mut mock, "P3");
        assert_eq!(mock.panel().lock().unwrap().setting.watts(), 40);
        clock.advance(Duration::from_secs(3));
        exchange(&mut mock, "P3");
        assert_eq!(mock.panel().lock().unwrap().setting.watts(), 40);
    }

    #[test]
    fn faults_are_active_low() {
        let (mut mock, _) = booted();
        mock.panel().lock().unwrap().faults = vec![Fault::HighTemp, Fault::HighSwr];
        // led_10, led_30, led_40 lit; red_en
        assert_eq!(exchange(&mut mock, "RA"), "RA\r\n10D\r\n");
    }

    #[test]
    fn unknown_command() {
        let (mut mock, _) = booted();
        assert_eq!(exchange(&mut mock, "XY"), "XY\r\nUnhandled statement\r\n");
        assert_eq!(*mock.command_log().lock().unwrap(), vec!["XY"]);
    }

    #[test]
    fn corrupt_echo() {
        let (mut mock, _) = booted();
        mock.panel().lock().unwrap().corrupt_echo = true;
        assert_eq!(exchange(&mut mock, "RA"), "ra\r\n0\r\n");
    }
}
