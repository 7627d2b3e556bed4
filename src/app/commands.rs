//! Inbound commands to the monitor core.
//!
//! These represent actions requested by the outside world (cloud toggle
//! writes, the keypad menu) that the
//! [`MonitorService`](super::service::MonitorService) interprets and acts
//! upon.

use crate::app::events::InstanceId;
use crate::config::Thresholds;
use crate::policy::WindowState;

/// Commands that external adapters and the menu can send into the core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Replace the comfort thresholds (validated before applying).
    SetThresholds(Thresholds),

    /// A toggle write from the cloud channel (e.g. device enable).
    SetToggle { instance: InstanceId, state: bool },

    /// Manually hold the window in a position from the keypad menu.
    OverrideWindow(WindowState),

    /// Return the window to automatic control.
    ReleaseOverride,
}
