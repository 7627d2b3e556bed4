//! System configuration parameters
//!
//! All tunable parameters for the window monitor.  Thresholds can be
//! adjusted at runtime from the keypad menu; the whole struct round-trips
//! through serde for provisioning and storage.

use serde::{Deserialize, Serialize};

/// Comfort thresholds consumed by the actuation policy.
///
/// The window opens only while temperature sits inside
/// `[temp_low_c, temp_high_c]` and humidity is within
/// `humidity_tolerance_pct` of `humidity_target_pct`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lower temperature limit (°C) — below this the window closes.
    pub temp_low_c: f32,
    /// Upper temperature limit (°C) — above this the window closes.
    pub temp_high_c: f32,
    /// Target relative humidity (%).
    pub humidity_target_pct: f32,
    /// Allowed deviation from the target humidity (%).
    pub humidity_tolerance_pct: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temp_low_c: 15.0,
            temp_high_c: 28.0,
            humidity_target_pct: 50.0,
            humidity_tolerance_pct: 10.0,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Comfort thresholds (menu-adjustable).
    pub thresholds: Thresholds,

    // --- Timing ---
    /// Minimum gap between temperature/humidity report events (milliseconds).
    pub weather_event_interval_ms: u32,
    /// Rain sensor sample interval (milliseconds) — deliberately decoupled
    /// from the weather interval.
    pub rain_sample_interval_ms: u32,
    /// Control loop tick interval (milliseconds).
    pub control_loop_interval_ms: u32,

    // --- Menu ---
    /// Step applied per scroll key press when editing a threshold.
    pub menu_step: f32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),

            // Timing
            weather_event_interval_ms: 60_000, // 1/min
            rain_sample_interval_ms: 10_000,   // every 10 s
            control_loop_interval_ms: 250,     // 4 Hz

            menu_step: 0.5,
        }
    }
}

impl MonitorConfig {
    /// Range-check the configuration.  Returns the first violated rule.
    ///
    /// Called by `ConfigPort::save` implementations so a compromised
    /// provisioning channel cannot inject dangerous parameters
    /// (e.g. `temp_high_c` below `temp_low_c` would latch the window shut).
    pub fn validate(&self) -> Result<(), &'static str> {
        let t = &self.thresholds;
        if !t.temp_low_c.is_finite() || !t.temp_high_c.is_finite() {
            return Err("temperature limits must be finite");
        }
        if t.temp_low_c >= t.temp_high_c {
            return Err("temp_low_c must be below temp_high_c");
        }
        if !(0.0..=100.0).contains(&t.humidity_target_pct) {
            return Err("humidity_target_pct outside 0–100");
        }
        if !(0.0..=50.0).contains(&t.humidity_tolerance_pct) {
            return Err("humidity_tolerance_pct outside 0–50");
        }
        if self.weather_event_interval_ms == 0
            || self.rain_sample_interval_ms == 0
            || self.control_loop_interval_ms == 0
        {
            return Err("intervals must be non-zero");
        }
        if self.menu_step <= 0.0 || !self.menu_step.is_finite() {
            return Err("menu_step must be positive");
        }
        Ok(())
    }
}
