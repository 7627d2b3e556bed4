//! Temperature / humidity sampler.
//!
//! Polls the DHT at most once per reporting interval, validates the raw
//! values, and forwards every valid sample to the cloud reporting channel.
//! The "last accepted" baseline only moves when a report actually went
//! out: a NaN read or a failed send leaves the timer un-armed so the next
//! control tick retries, instead of waiting out a whole fresh interval.

use log::{info, warn};

use crate::app::ports::{ReportingPort, WeatherSensorPort};
use crate::timing::IntervalTimer;

/// One validated temperature/humidity sample.  Immutable once created;
/// the next sample supersedes it, nothing mutates it in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// Monotonic milliseconds at sample time.
    pub timestamp_ms: u32,
}

/// Gated DHT poller with report forwarding.
pub struct WeatherSampler {
    timer: IntervalTimer,
    last: Option<Reading>,
}

impl WeatherSampler {
    /// `interval_ms` is the minimum gap between report events.  The first
    /// sample fires immediately (startup reading).
    pub fn new(interval_ms: u32) -> Self {
        Self {
            timer: IntervalTimer::expired(interval_ms),
            last: None,
        }
    }

    /// Last successfully reported reading, if any.
    pub fn last_reading(&self) -> Option<&Reading> {
        self.last.as_ref()
    }

    /// Run one gated sample.
    ///
    /// Produces `Some(reading)` only when the device is enabled, the
    /// interval has elapsed, both channels read finite, and the report
    /// was accepted.  Every other path returns `None` and leaves the
    /// baseline untouched.
    pub fn sample(
        &mut self,
        now_ms: u32,
        enabled: bool,
        sensor: &mut impl WeatherSensorPort,
        reporting: &mut impl ReportingPort,
    ) -> Option<Reading> {
        if !enabled {
            return None; // device is off...do nothing
        }
        if !self.timer.is_elapsed(now_ms) {
            return None;
        }

        let temperature_c = sensor.read_temperature();
        let humidity_pct = sensor.read_humidity();

        if !temperature_c.is_finite() || !humidity_pct.is_finite() {
            // Glitch or disconnect — drop the sample, retry next tick.
            warn!("DHT reading failed (t={temperature_c}, h={humidity_pct})");
            return None;
        }

        let reading = Reading {
            temperature_c,
            humidity_pct,
            timestamp_ms: now_ms,
        };

        // Dedup against the baseline is observability only — an unchanged
        // pair is still reported.
        if let Some(last) = &self.last {
            if last.temperature_c == temperature_c && last.humidity_pct == humidity_pct {
                info!("weather unchanged since last report ({temperature_c:.1}°C {humidity_pct:.1}%)");
            }
        }

        if !reporting.send_reading(temperature_c, humidity_pct) {
            // Must not promote the baseline as if the send had succeeded:
            // the next tick re-attempts against the old comparison point.
            warn!("could not send reading event to server");
            return None;
        }

        info!("Temperature: {temperature_c:.1} °C\tHumidity: {humidity_pct:.1} %");
        self.timer.arm(now_ms);
        self.last = Some(reading);
        Some(reading)
    }
}
