//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured monitor events to the
//! logger (UART / USB-CDC in production).  A future telemetry adapter
//! would implement the same trait.

use log::info;

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`MonitorEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Started => {
                info!("START | monitor online");
            }
            MonitorEvent::ReadingPublished(r) => {
                info!(
                    "READ  | T={:.1}\u{00b0}C H={:.1}% @ {}ms",
                    r.temperature_c, r.humidity_pct, r.timestamp_ms,
                );
            }
            MonitorEvent::RainChanged(state) => {
                info!(
                    "RAIN  | {} (analog={})",
                    if state.is_wet { "wet" } else { "dry" },
                    state.analog_level,
                );
            }
            MonitorEvent::VerdictChanged { from, to } => {
                info!(
                    "WINDOW| {:?} -> {:?} ({:?})",
                    from.map(|v| v.window),
                    to.window,
                    to.reason,
                );
            }
            MonitorEvent::NotificationSent(text) => {
                info!("PUSH  | {text}");
            }
            MonitorEvent::ToggleChanged { instance, state } => {
                info!("TOGGLE| {} = {}", instance, if *state { "on" } else { "off" });
            }
            MonitorEvent::Key(k) => {
                info!(
                    "KEY   | {:?} R{} C{} '{}'",
                    k.edge, k.row, k.col, k.symbol,
                );
            }
            MonitorEvent::ThresholdsUpdated(t) => {
                info!(
                    "CONF  | temp {:.1}..{:.1} humidity {:.0}\u{00b1}{:.0}",
                    t.temp_low_c, t.temp_high_c, t.humidity_target_pct, t.humidity_tolerance_pct,
                );
            }
        }
    }
}
