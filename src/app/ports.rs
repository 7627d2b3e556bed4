//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensor drivers, the window motor, the cloud channel,
//! the display) implement these traits.  The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! The cloud channel is polled, never callback-driven: the control loop is
//! the sole scheduler, and inbound toggle writes surface as
//! [`AppCommand`]s from [`ReportingPort::poll`].

use crate::app::commands::AppCommand;
use crate::config::MonitorConfig;
use crate::keypad::RawScanCode;
use crate::policy::WindowState;
use crate::samplers::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// DHT temperature/humidity channel.  Returns NaN on a failed read —
/// validation happens in the sampler, not here.
pub trait WeatherSensorPort {
    fn read_temperature(&mut self) -> f32;
    fn read_humidity(&mut self) -> f32;
}

/// LM393 rain sensor channels.
pub trait RainSensorPort {
    /// Raw ADC level, 0..=4095.
    fn read_analog(&mut self) -> u16;
    /// Digital comparator output: `true` = dry (the sensor is active-low).
    fn read_digital_dry(&mut self) -> bool;
}

/// Keypad controller FIFO.  `None` when no event is pending — that is
/// the normal idle case, not an error.
pub trait KeypadPort {
    fn next_raw_event(&mut self) -> Option<RawScanCode>;
}

// ───────────────────────────────────────────────────────────────
// Actuation / output ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Window actuator plus the status LEDs that mirror monitor state.
pub trait WindowPort {
    /// Drive the window to the commanded position.
    fn drive(&mut self, state: WindowState);

    /// Green LED: lit while the window is open.
    fn set_window_led(&mut self, open: bool);

    /// RGB temperature-band LED (blue = cold, green = in range, red = hot).
    fn set_temp_led(&mut self, r: u8, g: u8, b: u8);
}

/// Display renderer.  Accepts the latest reading and draws it; the
/// monitor keeps no display state beyond "last handed over".
pub trait DisplayPort {
    fn show_reading(&mut self, reading: &Reading);
}

// ───────────────────────────────────────────────────────────────
// Cloud reporting port (domain ↔ event/notification channel)
// ───────────────────────────────────────────────────────────────

/// The external reporting channel (Sinric-style device cloud).
///
/// All sends return plain success/failure — the channel is assumed
/// reliable-enough and the domain's only reaction to failure is to log
/// and withhold baseline promotion.
pub trait ReportingPort {
    /// Drain one pending inbound command (e.g. a toggle write from the
    /// server).  Called repeatedly each tick until it returns `None`.
    fn poll(&mut self) -> Option<AppCommand>;

    fn send_reading(&mut self, temperature_c: f32, humidity_pct: f32) -> bool;
    fn send_push_notification(&mut self, text: &str) -> bool;
    fn send_toggle_state(&mut self, instance: &str, state: bool) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration / storage ports
// ───────────────────────────────────────────────────────────────

/// Loads and persists monitor configuration.
///
/// Implementations MUST validate before persisting
/// ([`MonitorConfig::validate`]) — invalid ranges are rejected with
/// [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration from storage.  `Err(ConfigError::NotFound)` on
    /// first boot.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

/// Minimal key-value storage beneath [`ConfigPort`].
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug)]
pub enum StorageError {
    NotFound,
    Full,
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Scripted port doubles shared by the unit tests
// ───────────────────────────────────────────────────────────────
