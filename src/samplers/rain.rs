//! Rain sensor sampler.
//!
//! Samples the LM393 board on its own interval, independent of the
//! weather sampler.  Both channels are read and logged, but only the
//! digital comparator output decides wetness — the ADC input is
//! non-linearly weighted toward 4095 and does not track the comparator's
//! sensitivity, so it is telemetry only.

use log::info;

use crate::app::ports::RainSensorPort;
use crate::timing::IntervalTimer;

/// One rain sensor sample.  Raw values are trusted as-is — there is no
/// validity filtering on this channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainState {
    /// Raw ADC level, 0..=4095.
    pub analog_level: u16,
    /// Derived from the digital channel only.
    pub is_wet: bool,
    /// Monotonic milliseconds at sample time.
    pub timestamp_ms: u32,
}

/// Gated LM393 poller.
pub struct RainSampler {
    timer: IntervalTimer,
    last: Option<RainState>,
}

impl RainSampler {
    /// The first sample fires immediately (startup reading).
    pub fn new(interval_ms: u32) -> Self {
        Self {
            timer: IntervalTimer::expired(interval_ms),
            last: None,
        }
    }

    /// Last observed rain state, if any.  Dry until proven otherwise is
    /// NOT assumed — before the first sample there is no state.
    pub fn last_state(&self) -> Option<&RainState> {
        self.last.as_ref()
    }

    /// Run one gated sample.  Returns `Some` exactly when the interval
    /// elapsed and a fresh pair of channel reads was taken.
    pub fn sample(&mut self, now_ms: u32, sensor: &mut impl RainSensorPort) -> Option<RainState> {
        if !self.timer.ready(now_ms) {
            return None;
        }

        let analog_level = sensor.read_analog();
        // Comparator output is active-low: dry = 1, wet = 0.
        let is_wet = !sensor.read_digital_dry();

        info!("rain analog: {analog_level}\tdigital: {}", if is_wet { 0 } else { 1 });

        let state = RainState {
            analog_level,
            is_wet,
            timestamp_ms: now_ms,
        };
        self.last = Some(state);
        Some(state)
    }
}
