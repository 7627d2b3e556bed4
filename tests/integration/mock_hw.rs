//! Mock hardware adapter for integration tests.
//!
//! Records every actuator/display call so tests can assert on the full
//! command history without touching real GPIO/I²C/PWM.

use std::collections::VecDeque;

use windowmon::app::commands::AppCommand;
use windowmon::app::events::MonitorEvent;
use windowmon::app::ports::{
    DisplayPort, EventSink, KeypadPort, RainSensorPort, ReportingPort, WeatherSensorPort,
    WindowPort,
};
use windowmon::keypad::RawScanCode;
use windowmon::policy::WindowState;
use windowmon::samplers::Reading;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Drive(WindowState),
    WindowLed(bool),
    TempLed(u8, u8, u8),
    Display(f32, f32),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub temperature: f32,
    pub humidity: f32,
    pub rain_analog: u16,
    pub rain_dry: bool,
    pub key_fifo: VecDeque<RawScanCode>,
    pub calls: Vec<HwCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn comfortable() -> Self {
        Self {
            temperature: 22.0,
            humidity: 50.0,
            rain_analog: 4050,
            rain_dry: true,
            key_fifo: VecDeque::new(),
            calls: Vec::new(),
        }
    }

    /// Last commanded window position, if any.
    pub fn window(&self) -> Option<WindowState> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::Drive(state) => Some(*state),
            _ => None,
        })
    }

    pub fn drive_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Drive(_)))
            .count()
    }

    pub fn displayed(&self) -> Vec<(f32, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Display(t, h) => Some((*t, *h)),
                _ => None,
            })
            .collect()
    }

    pub fn temp_led(&self) -> Option<(u8, u8, u8)> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::TempLed(r, g, b) => Some((*r, *g, *b)),
            _ => None,
        })
    }

    pub fn push_key(&mut self, raw: RawScanCode) {
        self.key_fifo.push_back(raw);
    }
}

impl WeatherSensorPort for MockHardware {
    fn read_temperature(&mut self) -> f32 {
        self.temperature
    }

    fn read_humidity(&mut self) -> f32 {
        self.humidity
    }
}

impl RainSensorPort for MockHardware {
    fn read_analog(&mut self) -> u16 {
        self.rain_analog
    }

    fn read_digital_dry(&mut self) -> bool {
        self.rain_dry
    }
}

impl KeypadPort for MockHardware {
    fn next_raw_event(&mut self) -> Option<RawScanCode> {
        self.key_fifo.pop_front()
    }
}

impl WindowPort for MockHardware {
    fn drive(&mut self, state: WindowState) {
        self.calls.push(HwCall::Drive(state));
    }

    fn set_window_led(&mut self, open: bool) {
        self.calls.push(HwCall::WindowLed(open));
    }

    fn set_temp_led(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(HwCall::TempLed(r, g, b));
    }
}

impl DisplayPort for MockHardware {
    fn show_reading(&mut self, reading: &Reading) {
        self.calls
            .push(HwCall::Display(reading.temperature_c, reading.humidity_pct));
    }
}

// ── MockReporting ─────────────────────────────────────────────

pub struct MockReporting {
    pub accept: bool,
    pub readings: Vec<(f32, f32)>,
    pub notifications: Vec<String>,
    pub toggles: Vec<(String, bool)>,
    pub inbound: VecDeque<AppCommand>,
}

#[allow(dead_code)]
impl MockReporting {
    pub fn new() -> Self {
        Self {
            accept: true,
            readings: Vec::new(),
            notifications: Vec::new(),
            toggles: Vec::new(),
            inbound: VecDeque::new(),
        }
    }

    pub fn last_toggle(&self, instance: &str) -> Option<bool> {
        self.toggles
            .iter()
            .rev()
            .find(|(i, _)| i == instance)
            .map(|(_, s)| *s)
    }
}

impl Default for MockReporting {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingPort for MockReporting {
    fn poll(&mut self) -> Option<AppCommand> {
        self.inbound.pop_front()
    }

    fn send_reading(&mut self, temperature_c: f32, humidity_pct: f32) -> bool {
        if self.accept {
            self.readings.push((temperature_c, humidity_pct));
        }
        self.accept
    }

    fn send_push_notification(&mut self, text: &str) -> bool {
        if self.accept {
            self.notifications.push(text.to_string());
        }
        self.accept
    }

    fn send_toggle_state(&mut self, instance: &str, state: bool) -> bool {
        if self.accept {
            self.toggles.push((instance.to_string(), state));
        }
        self.accept
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<MonitorEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&MonitorEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &MonitorEvent) {
        self.events.push(event.clone());
    }
}
