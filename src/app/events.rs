//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them — log to serial, mirror to
//! a telemetry channel, etc.

use crate::config::Thresholds;
use crate::keypad::KeyEvent;
use crate::policy::Verdict;
use crate::samplers::{RainState, Reading};

/// Identifier of an externally visible toggle (bounded, no heap).
pub type InstanceId = heapless::String<24>;

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// The control loop has started.
    Started,

    /// A validated reading was accepted by the reporting channel.
    ReadingPublished(Reading),

    /// The rain sensor's wet/dry observation flipped.
    RainChanged(RainState),

    /// The actuation verdict changed; `from` is `None` on the first
    /// evaluation after boot.
    VerdictChanged { from: Option<Verdict>, to: Verdict },

    /// An alert push notification went out.
    NotificationSent(&'static str),

    /// A toggle instance changed state (cloud write or local action).
    ToggleChanged { instance: InstanceId, state: bool },

    /// A decoded key event (presses and releases both).
    Key(KeyEvent),

    /// The comfort thresholds were updated at runtime.
    ThresholdsUpdated(Thresholds),
}
