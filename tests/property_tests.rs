//! Property tests for the core decision and decoding logic.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;

use windowmon::config::Thresholds;
use windowmon::keypad::{decode, encode, KeyEdge, RawScanCode};
use windowmon::policy::{evaluate, AlertReason, WindowState};
use windowmon::samplers::Reading;
use windowmon::timing::IntervalTimer;

fn arb_thresholds() -> impl Strategy<Value = Thresholds> {
    (-20.0f32..20.0, 0.1f32..30.0, 0.0f32..100.0, 0.0f32..50.0).prop_map(
        |(low, span, target, tol)| Thresholds {
            temp_low_c: low,
            temp_high_c: low + span,
            humidity_target_pct: target,
            humidity_tolerance_pct: tol,
        },
    )
}

fn arb_reading() -> impl Strategy<Value = Reading> {
    (-40.0f32..60.0, 0.0f32..100.0).prop_map(|(t, h)| Reading {
        temperature_c: t,
        humidity_pct: h,
        timestamp_ms: 0,
    })
}

// ── Actuation policy ──────────────────────────────────────────

proptest! {
    /// Dry-weather verdict is Open exactly when both channels are in
    /// band; Closed always carries a reason.
    #[test]
    fn open_iff_in_band_when_dry(r in arb_reading(), t in arb_thresholds()) {
        let v = evaluate(&r, false, &t);

        let in_band = r.temperature_c >= t.temp_low_c
            && r.temperature_c <= t.temp_high_c
            && (r.humidity_pct - t.humidity_target_pct).abs() <= t.humidity_tolerance_pct;

        if in_band {
            prop_assert_eq!(v.window, WindowState::Open);
            prop_assert_eq!(v.reason, AlertReason::None);
        } else {
            prop_assert_eq!(v.window, WindowState::Closed);
            prop_assert_ne!(v.reason, AlertReason::None);
        }
    }

    /// Rain always wins, whatever the reading says.
    #[test]
    fn rain_always_dominates(r in arb_reading(), t in arb_thresholds()) {
        let v = evaluate(&r, true, &t);
        prop_assert_eq!(v.window, WindowState::Closed);
        prop_assert_eq!(v.reason, AlertReason::Rain);
    }

    /// Temperature outranks humidity when both are violated.
    #[test]
    fn temperature_outranks_humidity(t in arb_thresholds()) {
        let r = Reading {
            temperature_c: t.temp_low_c - 1.0,
            humidity_pct: t.humidity_target_pct + t.humidity_tolerance_pct + 1.0,
            timestamp_ms: 0,
        };
        prop_assert_eq!(evaluate(&r, false, &t).reason, AlertReason::TempLow);
    }

    /// Same inputs, same verdict — the function is deterministic.
    #[test]
    fn evaluation_is_deterministic(r in arb_reading(), t in arb_thresholds(), wet: bool) {
        prop_assert_eq!(evaluate(&r, wet, &t), evaluate(&r, wet, &t));
    }
}

// ── Interval timer ────────────────────────────────────────────

proptest! {
    /// After a fire at `start`: never fires again within the period,
    /// always fires one full period later.
    #[test]
    fn gate_fires_at_most_once_per_period(
        start in any::<u32>(),
        period in 1u32..1_000_000,
        early in 0u32..1_000_000,
    ) {
        let mut timer = IntervalTimer::new(period);
        timer.arm(start);

        if early < period {
            prop_assert!(!timer.ready(start.wrapping_add(early)));
        }
        prop_assert!(timer.ready(start.wrapping_add(period)));
    }

    /// The gate keeps working when the period spans the u32 wraparound.
    #[test]
    fn gate_survives_wraparound(
        offset in 0u32..10_000,
        period in 1u32..1_000_000,
    ) {
        let mut timer = IntervalTimer::new(period);
        let near_max = u32::MAX - offset;
        timer.arm(near_max);

        let wrapped = near_max.wrapping_add(period);
        prop_assert!(timer.ready(wrapped), "fire exactly one period after the wrap");
        prop_assert!(!timer.ready(wrapped), "and immediately re-arm");
    }
}

// ── Keypad decoding ───────────────────────────────────────────

proptest! {
    /// Decoding any byte either yields an in-matrix event or a typed
    /// error — never a panic, never an out-of-range row/col.
    #[test]
    fn decode_is_total_and_bounded(raw in any::<u8>()) {
        if let Ok(event) = decode(RawScanCode(raw)) {
            prop_assert!(event.row < 4);
            prop_assert!(event.col < 4);
        }
    }

    /// Every physical position round-trips through encode → decode.
    #[test]
    fn valid_positions_roundtrip(row in 0u8..4, col in 0u8..4, press: bool) {
        let edge = if press { KeyEdge::Press } else { KeyEdge::Release };
        let event = decode(encode(row, col, edge)).unwrap();
        prop_assert_eq!(event.row, row);
        prop_assert_eq!(event.col, col);
        prop_assert_eq!(event.edge, edge);
    }
}
