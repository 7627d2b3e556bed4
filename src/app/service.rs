//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the samplers, the actuation policy, the menu,
//! and the toggle map.  It exposes a clean, hardware-agnostic API; all
//! I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  WeatherSensorPort ─┐                        ┌─▶ WindowPort
//!  RainSensorPort ────┤  ┌──────────────────┐  ├─▶ DisplayPort
//!  KeypadPort ────────┼─▶│  MonitorService   │──┤
//!  ReportingPort.poll ┘  │ samplers · policy │  ├─▶ ReportingPort
//!                        └──────────────────┘  └─▶ EventSink
//! ```
//!
//! Each `tick` runs the handlers in a fixed order, and every handler is
//! independent: a no-op, gated-out, or failed handler never blocks the
//! others in the same tick.

use heapless::FnvIndexMap;
use log::{info, warn};

use crate::app::commands::AppCommand;
use crate::app::events::{InstanceId, MonitorEvent};
use crate::app::ports::{
    DisplayPort, EventSink, KeypadPort, RainSensorPort, ReportingPort, WeatherSensorPort,
    WindowPort,
};
use crate::config::{MonitorConfig, Thresholds};
use crate::keypad;
use crate::menu::Menu;
use crate::policy::{self, ActuationPolicy, AlertReason, Verdict, WindowState};
use crate::samplers::{RainSampler, RainState, Reading, WeatherSampler};

/// Toggle instance that gates the weather sampler (cloud-writable).
pub const DEVICE_ENABLE_INSTANCE: &str = "deviceEnable";
/// Toggle instance mirroring the window position to the cloud.
pub const WINDOW_TOGGLE_INSTANCE: &str = "windowOpen";

/// Keypad FIFO events drained per tick.  Bounds the tick even if the
/// controller floods (held key auto-repeat); leftovers drain next tick.
const MAX_KEY_EVENTS_PER_TICK: usize = 8;

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The monitor core.  Single-threaded: all state is owned here and
/// mutated only inside [`tick`](Self::tick) /
/// [`handle_command`](Self::handle_command).
pub struct MonitorService {
    config: MonitorConfig,
    toggles: FnvIndexMap<InstanceId, bool, 4>,
    weather: WeatherSampler,
    rain: RainSampler,
    policy: ActuationPolicy,
    menu: Menu,
    /// Last applied verdict (`None` until the first evaluation).
    verdict: Option<Verdict>,
    /// Manual hold from the menu; suspends automatic window drive.
    window_override: Option<WindowState>,
    tick_count: u64,
}

impl MonitorService {
    pub fn new(config: MonitorConfig) -> Self {
        debug_assert!(keypad::validate_keymap(), "keymap has duplicate symbols");
        let weather = WeatherSampler::new(config.weather_event_interval_ms);
        let rain = RainSampler::new(config.rain_sample_interval_ms);
        Self {
            config,
            toggles: FnvIndexMap::new(),
            weather,
            rain,
            policy: ActuationPolicy::new(),
            menu: Menu::new(),
            verdict: None,
            window_override: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the device and emit the start event.  Call once before
    /// the first tick; collaborators must already be initialised.
    pub fn start(&mut self, reporting: &mut impl ReportingPort, sink: &mut impl EventSink) {
        if !reporting.send_push_notification("Weather monitor is online") {
            warn!("could not announce device online");
        }
        sink.emit(&MonitorEvent::Started);
        info!("MonitorService started");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: inbound commands → keypad → rain →
    /// weather → policy → display.
    ///
    /// The `hw` parameter satisfies every hardware-facing port at once —
    /// this avoids a double mutable borrow while keeping the port
    /// boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl WeatherSensorPort + RainSensorPort + KeypadPort + WindowPort + DisplayPort),
        reporting: &mut impl ReportingPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Inbound cloud commands — polled, the loop is the sole
        //    scheduler (no callback dispatch).
        while let Some(cmd) = reporting.poll() {
            self.handle_command(cmd, hw, sink);
        }

        // 2. Keypad decode → menu.  A malformed scan code is rejected
        //    and logged; the tick continues.
        for _ in 0..MAX_KEY_EVENTS_PER_TICK {
            let Some(raw) = hw.next_raw_event() else { break };
            match keypad::decode(raw) {
                Ok(event) => {
                    sink.emit(&MonitorEvent::Key(event));
                    let cmd = self.menu.handle_key(
                        &event,
                        &self.config.thresholds,
                        self.config.menu_step,
                    );
                    if let Some(cmd) = cmd {
                        self.handle_command(cmd, hw, sink);
                    }
                }
                Err(e) => warn!("keypad: {e}"),
            }
        }

        // 3. Rain sampling, on its own interval.
        let prev_wet = self.rain.last_state().map(|s| s.is_wet);
        if let Some(state) = self.rain.sample(now_ms, hw) {
            if prev_wet != Some(state.is_wet) {
                sink.emit(&MonitorEvent::RainChanged(state));
            }
        }

        // 4. Weather sampling + report forwarding.
        let enabled = self.device_enabled();
        if let Some(reading) = self.weather.sample(now_ms, enabled, hw, reporting) {
            sink.emit(&MonitorEvent::ReadingPublished(reading));
        }

        // 5. Actuation policy.  Recomputed from scratch; dispatch is
        //    edge-triggered on verdict change.
        self.evaluate_policy(hw, reporting, sink);

        // 6. Display and temperature-band LED always track the latest
        //    known reading.
        if let Some(reading) = self.weather.last_reading() {
            hw.show_reading(reading);
            let (r, g, b) = temp_band_colour(reading.temperature_c, &self.config.thresholds);
            hw.set_temp_led(r, g, b);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (cloud toggle write or menu action).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl WindowPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::SetThresholds(thresholds) => {
                let mut candidate = self.config.clone();
                candidate.thresholds = thresholds;
                match candidate.validate() {
                    Ok(()) => {
                        info!(
                            "thresholds updated: temp {:.1}–{:.1} °C, humidity {:.0}±{:.0} %",
                            thresholds.temp_low_c,
                            thresholds.temp_high_c,
                            thresholds.humidity_target_pct,
                            thresholds.humidity_tolerance_pct,
                        );
                        self.config.thresholds = thresholds;
                        sink.emit(&MonitorEvent::ThresholdsUpdated(thresholds));
                    }
                    Err(msg) => warn!("rejected thresholds: {msg}"),
                }
            }

            AppCommand::SetToggle { instance, state } => {
                info!(
                    "toggle \"{}\" set to {}",
                    instance,
                    if state { "on" } else { "off" }
                );
                let event_instance = instance.clone();
                if self.toggles.insert(instance, state).is_err() {
                    warn!("toggle map full, write dropped");
                    return;
                }
                sink.emit(&MonitorEvent::ToggleChanged {
                    instance: event_instance,
                    state,
                });
            }

            AppCommand::OverrideWindow(state) => {
                info!("manual window override: {:?}", state);
                self.window_override = Some(state);
                apply_window(state, hw);
            }

            AppCommand::ReleaseOverride => {
                info!("window override released");
                self.window_override = None;
                if let Some(v) = self.verdict {
                    apply_window(v.window, hw);
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }

    pub fn last_reading(&self) -> Option<&Reading> {
        self.weather.last_reading()
    }

    pub fn last_rain(&self) -> Option<&RainState> {
        self.rain.last_state()
    }

    pub fn window_override(&self) -> Option<WindowState> {
        self.window_override
    }

    pub fn toggle(&self, instance: &str) -> Option<bool> {
        let key = InstanceId::try_from(instance).ok()?;
        self.toggles.get(&key).copied()
    }

    /// Device-enable toggle; absent means enabled (matches the cloud
    /// device's default-on behaviour).
    pub fn device_enabled(&self) -> bool {
        self.toggle(DEVICE_ENABLE_INSTANCE).unwrap_or(true)
    }

    // ── Internal ──────────────────────────────────────────────

    fn evaluate_policy(
        &mut self,
        hw: &mut impl WindowPort,
        reporting: &mut impl ReportingPort,
        sink: &mut impl EventSink,
    ) {
        let wet = self.rain.last_state().is_some_and(|s| s.is_wet);
        let verdict = match self.weather.last_reading() {
            Some(reading) => policy::evaluate(reading, wet, &self.config.thresholds),
            // No weather baseline yet — only rain can force a decision.
            None if wet => Verdict::closed(AlertReason::Rain),
            None => return,
        };

        if self.verdict == Some(verdict) {
            return;
        }
        let from = self.verdict;
        self.verdict = Some(verdict);
        info!("verdict: {:?} ({:?})", verdict.window, verdict.reason);

        if self.window_override.is_none() {
            apply_window(verdict.window, hw);
        }
        sink.emit(&MonitorEvent::VerdictChanged { from, to: verdict });

        // Edge-triggered: the policy hands out each alert text once per
        // transition.  A failed push is logged, not retried — the next
        // notification fires on the next transition.
        if let Some(text) = self.policy.notification(verdict) {
            if reporting.send_push_notification(text) {
                sink.emit(&MonitorEvent::NotificationSent(text));
            } else {
                warn!("could not send push notification");
            }
        }

        let open = verdict.window == WindowState::Open;
        if !reporting.send_toggle_state(WINDOW_TOGGLE_INSTANCE, open) {
            warn!("could not send window toggle state");
        }
    }
}

/// Drive the window and keep the green LED in lockstep.
fn apply_window(state: WindowState, hw: &mut impl WindowPort) {
    hw.drive(state);
    hw.set_window_led(state == WindowState::Open);
}

/// RGB band for the temperature status LED: blue below the lower limit,
/// red above the upper, green in between.
fn temp_band_colour(temp_c: f32, t: &Thresholds) -> (u8, u8, u8) {
    if temp_c < t.temp_low_c {
        (0, 0, 255)
    } else if temp_c > t.temp_high_c {
        (255, 0, 0)
    } else {
        (0, 255, 0)
    }
}
