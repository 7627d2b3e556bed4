//! Window actuation policy.
//!
//! [`evaluate`] is a pure function from the latest validated reading, the
//! rain state, and the configured thresholds to a [`Verdict`].  First match
//! wins: rain dominates everything, then the temperature limits, then the
//! humidity band.  The window is never `Open` with an alert reason — any
//! alert closes it.
//!
//! The only state in this module is notification dedup: a transition into
//! a closing verdict pushes exactly one notification, re-evaluating the
//! same condition pushes none (edge-triggered, not level-triggered).

use crate::config::Thresholds;
use crate::samplers::Reading;

/// Commanded window position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Open,
    Closed,
}

/// Why the policy closed the window (`None` iff the window is open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertReason {
    None,
    TempLow,
    TempHigh,
    HumidityOut,
    Rain,
}

/// The outcome of one policy evaluation.  Recomputed from scratch every
/// time — never patched incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub window: WindowState,
    pub reason: AlertReason,
}

impl Verdict {
    pub const OPEN: Self = Self {
        window: WindowState::Open,
        reason: AlertReason::None,
    };

    pub const fn closed(reason: AlertReason) -> Self {
        Self {
            window: WindowState::Closed,
            reason,
        }
    }
}

/// Pure decision function.  Priority order, first match wins:
/// rain → temperature low → temperature high → humidity out of band.
pub fn evaluate(reading: &Reading, rain_is_wet: bool, thresholds: &Thresholds) -> Verdict {
    if rain_is_wet {
        return Verdict::closed(AlertReason::Rain);
    }
    if reading.temperature_c < thresholds.temp_low_c {
        return Verdict::closed(AlertReason::TempLow);
    }
    if reading.temperature_c > thresholds.temp_high_c {
        return Verdict::closed(AlertReason::TempHigh);
    }
    if (reading.humidity_pct - thresholds.humidity_target_pct).abs()
        > thresholds.humidity_tolerance_pct
    {
        return Verdict::closed(AlertReason::HumidityOut);
    }
    Verdict::OPEN
}

/// Notification dedup for the policy.
///
/// Tracks the last verdict a notification was pushed for.  The stored
/// verdict is never an input to [`evaluate`] — it exists only so a
/// persisting alert does not re-notify every tick.
#[derive(Debug, Default)]
pub struct ActuationPolicy {
    last_notified: Option<Verdict>,
}

impl ActuationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the push-notification text for `verdict`, exactly once per
    /// transition into a closing verdict.  Open verdicts clear the edge so
    /// the next alert notifies again.
    pub fn notification(&mut self, verdict: Verdict) -> Option<&'static str> {
        if self.last_notified == Some(verdict) {
            return None;
        }
        self.last_notified = Some(verdict);

        match verdict.reason {
            AlertReason::None => None,
            AlertReason::TempLow => Some("Closing window: temperature below lower limit"),
            AlertReason::TempHigh => Some("Closing window: temperature above upper limit"),
            AlertReason::HumidityOut => Some("Closing window: humidity out of range"),
            AlertReason::Rain => Some("Closing window: rain detected"),
        }
    }
}
