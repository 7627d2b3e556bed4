#![allow(dead_code)] // Error types reserved for future typed port returns

//! Unified error types for the window monitor firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level control loop's error handling
//! uniform.  All variants are `Copy` so they can be cheaply passed through
//! the control loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned unusable data.
    Sensor(SensorError),
    /// A keypad scan code could not be decoded.
    Keypad(KeypadError),
    /// An outbound report to the cloud channel failed.
    Report(ReportError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Keypad(e) => write!(f, "keypad: {e}"),
            Self::Report(e) => write!(f, "report: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// DHT returned NaN for temperature or humidity (glitch or disconnect).
    InvalidReading,
    /// ADC read returned an error or timed out.
    AdcReadFailed,
    /// GPIO read returned an error.
    GpioReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReading => write!(f, "invalid (NaN) reading"),
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Keypad errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadError {
    /// Scan code index decodes to a row/column outside the 4×4 matrix.
    /// Rejected rather than clamped: a clamped code would fire the wrong
    /// key action.
    MalformedScanCode(u8),
}

impl fmt::Display for KeypadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedScanCode(raw) => {
                write!(f, "malformed scan code 0x{raw:02X}")
            }
        }
    }
}

impl From<KeypadError> for Error {
    fn from(e: KeypadError) -> Self {
        Self::Keypad(e)
    }
}

// ---------------------------------------------------------------------------
// Reporting errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// The reading event could not be delivered.
    ReadingRejected,
    /// The push notification could not be delivered.
    NotificationRejected,
    /// The toggle-state event could not be delivered.
    ToggleRejected,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadingRejected => write!(f, "reading event rejected"),
            Self::NotificationRejected => write!(f, "push notification rejected"),
            Self::ToggleRejected => write!(f, "toggle event rejected"),
        }
    }
}

impl From<ReportError> for Error {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
