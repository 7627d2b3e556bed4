//! Cloud reporting adapter.
//!
//! Stands in for the device-cloud SDK (Sinric-style): outbound events
//! are logged to serial, inbound toggle writes are queued and drained by
//! the control loop through [`ReportingPort::poll`].  The real network
//! transport is the cloud SDK's concern and stays behind this boundary;
//! swapping in the SDK-backed implementation does not touch the domain.

use heapless::Deque;
use log::info;

use crate::app::commands::AppCommand;
use crate::app::ports::ReportingPort;

/// Inbound commands buffered between ticks.
const INBOUND_DEPTH: usize = 4;

pub struct CloudLink {
    inbound: Deque<AppCommand, INBOUND_DEPTH>,
    /// When false, every send is reported as failed — lets bench setups
    /// exercise the loop's failure paths without a network.
    online: bool,
}

impl Default for CloudLink {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudLink {
    pub fn new() -> Self {
        Self {
            inbound: Deque::new(),
            online: true,
        }
    }

    /// Mark the link up/down (wired to the transport's connection state).
    pub fn set_online(&mut self, online: bool) {
        if self.online != online {
            info!("[cloud]: {}", if online { "connected" } else { "disconnected" });
        }
        self.online = online;
    }

    /// Queue an inbound command (called by the transport glue when the
    /// server writes a toggle).  Returns `false` when the buffer is full.
    pub fn push_inbound(&mut self, cmd: AppCommand) -> bool {
        self.inbound.push_back(cmd).is_ok()
    }
}

impl ReportingPort for CloudLink {
    fn poll(&mut self) -> Option<AppCommand> {
        self.inbound.pop_front()
    }

    fn send_reading(&mut self, temperature_c: f32, humidity_pct: f32) -> bool {
        if self.online {
            info!("[cloud]: reading T={temperature_c:.1} H={humidity_pct:.1}");
        }
        self.online
    }

    fn send_push_notification(&mut self, text: &str) -> bool {
        if self.online {
            info!("[cloud]: push \"{text}\"");
        }
        self.online
    }

    fn send_toggle_state(&mut self, instance: &str, state: bool) -> bool {
        if self.online {
            info!("[cloud]: toggle {instance} = {state}");
        }
        self.online
    }
}
