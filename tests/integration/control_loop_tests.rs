//! Integration tests for the control loop: service → samplers → policy →
//! actuation/reporting, driven tick by tick through mock adapters.

use crate::mock_hw::{HwCall, MockHardware, MockReporting, RecordingSink};

use windowmon::app::commands::AppCommand;
use windowmon::app::events::{InstanceId, MonitorEvent};
use windowmon::app::service::{MonitorService, DEVICE_ENABLE_INSTANCE, WINDOW_TOGGLE_INSTANCE};
use windowmon::config::MonitorConfig;
use windowmon::keypad::{decode, encode, KeyEdge, RawScanCode};
use windowmon::policy::{AlertReason, WindowState};

/// Default weather report interval from `MonitorConfig`.
const WEATHER_MS: u32 = 60_000;
/// Default rain sample interval.
const RAIN_MS: u32 = 10_000;

fn make_service() -> (MonitorService, MockHardware, MockReporting, RecordingSink) {
    (
        MonitorService::new(MonitorConfig::default()),
        MockHardware::comfortable(),
        MockReporting::new(),
        RecordingSink::new(),
    )
}

/// Raw press scan code for the key printed as `symbol`.
fn press(symbol: char) -> RawScanCode {
    for row in 0..4u8 {
        for col in 0..4u8 {
            let raw = encode(row, col, KeyEdge::Press);
            if decode(raw).unwrap().symbol == symbol {
                return raw;
            }
        }
    }
    panic!("symbol {symbol} not on keypad");
}

fn alert_count(rep: &MockReporting) -> usize {
    rep.notifications
        .iter()
        .filter(|n| n.starts_with("Closing window"))
        .count()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_announces_device_online() {
    let (mut app, _hw, mut rep, mut sink) = make_service();
    app.start(&mut rep, &mut sink);

    assert_eq!(rep.notifications, vec!["Weather monitor is online"]);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, MonitorEvent::Started)));
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn comfortable_tick_opens_window_and_reports() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();

    app.tick(0, &mut hw, &mut rep, &mut sink);

    assert_eq!(rep.readings, vec![(22.0, 50.0)]);
    assert_eq!(hw.window(), Some(WindowState::Open));
    assert!(hw.calls.contains(&HwCall::WindowLed(true)));
    let verdict = app.verdict().unwrap();
    assert_eq!(verdict.window, WindowState::Open);
    assert_eq!(verdict.reason, AlertReason::None);
    assert_eq!(rep.last_toggle(WINDOW_TOGGLE_INSTANCE), Some(true));
    assert_eq!(alert_count(&rep), 0);
}

#[test]
fn display_tracks_latest_reading_every_tick() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();

    app.tick(0, &mut hw, &mut rep, &mut sink);
    // Gated-out tick: no fresh sample, but the display still gets the
    // last known reading.
    app.tick(250, &mut hw, &mut rep, &mut sink);

    assert_eq!(hw.displayed(), vec![(22.0, 50.0), (22.0, 50.0)]);
    assert_eq!(rep.readings.len(), 1);
}

#[test]
fn temp_led_follows_temperature_band() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();

    app.tick(0, &mut hw, &mut rep, &mut sink);
    assert_eq!(hw.temp_led(), Some((0, 255, 0)));

    hw.temperature = 30.0;
    app.tick(WEATHER_MS, &mut hw, &mut rep, &mut sink);
    assert_eq!(hw.temp_led(), Some((255, 0, 0)));

    hw.temperature = 5.0;
    app.tick(2 * WEATHER_MS, &mut hw, &mut rep, &mut sink);
    assert_eq!(hw.temp_led(), Some((0, 0, 255)));
}

// ── Alerts and notification dedup ─────────────────────────────

#[test]
fn hot_reading_closes_with_single_notification() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();
    hw.temperature = 30.0;

    app.tick(0, &mut hw, &mut rep, &mut sink);

    let verdict = app.verdict().unwrap();
    assert_eq!(verdict.window, WindowState::Closed);
    assert_eq!(verdict.reason, AlertReason::TempHigh);
    assert_eq!(hw.window(), Some(WindowState::Closed));
    assert_eq!(alert_count(&rep), 1);
    assert_eq!(rep.last_toggle(WINDOW_TOGGLE_INSTANCE), Some(false));

    // Same condition one interval later: reported again, notified never.
    app.tick(WEATHER_MS, &mut hw, &mut rep, &mut sink);
    assert_eq!(rep.readings.len(), 2);
    assert_eq!(alert_count(&rep), 1);
    assert_eq!(hw.drive_count(), 1, "no re-drive while verdict unchanged");
}

#[test]
fn notification_refires_after_condition_clears() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();

    hw.temperature = 30.0;
    app.tick(0, &mut hw, &mut rep, &mut sink);
    assert_eq!(alert_count(&rep), 1);

    hw.temperature = 22.0;
    app.tick(WEATHER_MS, &mut hw, &mut rep, &mut sink);
    assert_eq!(app.verdict().unwrap().window, WindowState::Open);
    assert_eq!(alert_count(&rep), 1, "reopening must not notify");

    hw.temperature = 30.0;
    app.tick(2 * WEATHER_MS, &mut hw, &mut rep, &mut sink);
    assert_eq!(alert_count(&rep), 2, "fresh transition notifies again");
}

#[test]
fn rain_overrides_temperature() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();
    hw.temperature = 5.0; // would be TempLow on its own
    hw.rain_dry = false;

    app.tick(0, &mut hw, &mut rep, &mut sink);

    let verdict = app.verdict().unwrap();
    assert_eq!(verdict.window, WindowState::Closed);
    assert_eq!(verdict.reason, AlertReason::Rain);
}

#[test]
fn rain_closes_between_weather_samples() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();

    app.tick(0, &mut hw, &mut rep, &mut sink);
    assert_eq!(app.verdict().unwrap().window, WindowState::Open);

    // Rain starts; the rain interval fires long before the next weather
    // report is due.  The stale-but-valid reading plus the fresh rain
    // state close the window.
    hw.rain_dry = false;
    app.tick(RAIN_MS, &mut hw, &mut rep, &mut sink);

    let verdict = app.verdict().unwrap();
    assert_eq!(verdict.reason, AlertReason::Rain);
    assert_eq!(hw.window(), Some(WindowState::Closed));
    assert_eq!(rep.readings.len(), 1, "no weather report was due yet");
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, MonitorEvent::RainChanged(s) if s.is_wet)));
}

// ── Sensor faults and reporting failures ──────────────────────

#[test]
fn nan_reading_keeps_baseline_and_retries_next_tick() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();

    app.tick(0, &mut hw, &mut rep, &mut sink);
    let baseline = *app.last_reading().unwrap();

    hw.temperature = f32::NAN;
    app.tick(WEATHER_MS, &mut hw, &mut rep, &mut sink);
    assert_eq!(rep.readings.len(), 1, "NaN sample must not be reported");
    assert_eq!(app.last_reading(), Some(&baseline));
    assert_eq!(app.verdict().unwrap().window, WindowState::Open);

    // Sensor recovers: the retry happens on the very next tick instead
    // of waiting out a fresh interval.
    hw.temperature = 23.0;
    app.tick(WEATHER_MS + 250, &mut hw, &mut rep, &mut sink);
    assert_eq!(rep.readings.len(), 2);
    assert_eq!(app.last_reading().unwrap().temperature_c, 23.0);
}

#[test]
fn report_failure_discards_sample_without_state_change() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();
    rep.accept = false;

    app.tick(0, &mut hw, &mut rep, &mut sink);
    assert!(app.last_reading().is_none());
    assert!(rep.readings.is_empty());

    // Channel recovers — next tick retries and promotes the baseline.
    rep.accept = true;
    app.tick(250, &mut hw, &mut rep, &mut sink);
    assert_eq!(rep.readings.len(), 1);
    assert!(app.last_reading().is_some());
}

// ── Toggles ───────────────────────────────────────────────────

#[test]
fn device_disable_toggle_gates_weather_sampling() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();
    rep.inbound.push_back(AppCommand::SetToggle {
        instance: InstanceId::try_from(DEVICE_ENABLE_INSTANCE).unwrap(),
        state: false,
    });

    app.tick(0, &mut hw, &mut rep, &mut sink);

    assert!(!app.device_enabled());
    assert!(rep.readings.is_empty(), "sampler must be gated off");
    assert!(app.last_rain().is_some(), "rain sampling is independent");
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, MonitorEvent::ToggleChanged { state: false, .. })));

    // Re-enable from the cloud; sampling resumes on the next tick.
    rep.inbound.push_back(AppCommand::SetToggle {
        instance: InstanceId::try_from(DEVICE_ENABLE_INSTANCE).unwrap(),
        state: true,
    });
    app.tick(250, &mut hw, &mut rep, &mut sink);
    assert_eq!(rep.readings.len(), 1);
}

// ── Keypad ────────────────────────────────────────────────────

#[test]
fn malformed_scan_code_never_blocks_the_tick() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();
    hw.push_key(RawScanCode(45)); // row 4 — off the matrix

    app.tick(0, &mut hw, &mut rep, &mut sink);

    assert!(!sink
        .events
        .iter()
        .any(|e| matches!(e, MonitorEvent::Key(_))));
    // The rest of the tick still ran.
    assert_eq!(rep.readings.len(), 1);
    assert_eq!(hw.window(), Some(WindowState::Open));
}

#[test]
fn key_events_are_decoded_and_emitted() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();
    hw.push_key(press('5'));

    app.tick(0, &mut hw, &mut rep, &mut sink);

    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, MonitorEvent::Key(k) if k.symbol == '5' && k.edge == KeyEdge::Press)));
}

#[test]
fn menu_override_holds_window_against_the_verdict() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();
    hw.temperature = 30.0;

    app.tick(0, &mut hw, &mut rep, &mut sink);
    assert_eq!(hw.window(), Some(WindowState::Closed));

    // C opens the menu, A scrolls back onto the window page, C forces
    // the window open.
    hw.push_key(press('C'));
    hw.push_key(press('A'));
    hw.push_key(press('C'));
    app.tick(250, &mut hw, &mut rep, &mut sink);

    assert_eq!(app.window_override(), Some(WindowState::Open));
    assert_eq!(hw.window(), Some(WindowState::Open));
    // Verdict is unchanged — the override only suspends actuation.
    assert_eq!(app.verdict().unwrap().window, WindowState::Closed);

    // Cycling on: C forces closed, then C releases back to automatic,
    // which re-applies the (closed) verdict.
    hw.push_key(press('C'));
    hw.push_key(press('C'));
    app.tick(500, &mut hw, &mut rep, &mut sink);

    assert_eq!(app.window_override(), None);
    assert_eq!(hw.window(), Some(WindowState::Closed));
}

#[test]
fn menu_commit_updates_thresholds() {
    let (mut app, mut hw, mut rep, mut sink) = make_service();

    // C C enters the temp-low editor; A A bumps it by two steps; C commits.
    for symbol in ['C', 'C', 'A', 'A', 'C'] {
        hw.push_key(press(symbol));
    }
    app.tick(0, &mut hw, &mut rep, &mut sink);

    let defaults = MonitorConfig::default();
    let expected = defaults.thresholds.temp_low_c + 2.0 * defaults.menu_step;
    assert!((app.thresholds().temp_low_c - expected).abs() < 1e-6);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, MonitorEvent::ThresholdsUpdated(_))));
}
