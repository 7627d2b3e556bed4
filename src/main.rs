//! WindowMon firmware — main entry point.
//!
//! Hexagonal architecture around a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  HardwareAdapter          CloudLink        LogEventSink    │
//! │  (sensors/keypad/window)  (ReportingPort)  (EventSink)     │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ───────────────       │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │          MonitorService (pure logic)             │      │
//! │  │  samplers · actuation policy · keypad menu       │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::{Delay, FreeRtos};
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::info;

use windowmon::adapters::cloud::CloudLink;
use windowmon::adapters::config_store::{MemoryStorage, StoredConfig};
use windowmon::adapters::hardware::HardwareAdapter;
use windowmon::adapters::log_sink::LogEventSink;
use windowmon::adapters::time::MonotonicClock;
use windowmon::app::service::MonitorService;
use windowmon::drivers::status_led::StatusLeds;
use windowmon::drivers::stepper::WindowStepper;
use windowmon::drivers::tca8418::Tca8418;
use windowmon::drivers;
use windowmon::pins;
use windowmon::sensors::dht::DhtSensor;
use windowmon::sensors::lm393::Lm393Sensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("WindowMon v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. One-shot peripheral init ───────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt before the
        // control loop ever runs.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;

    // ── 3. Keypad on I²C (init failure is fatal) ──────────────
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio23,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(100u32.kHz().into()),
    )?;
    let mut keypad = Tca8418::new(i2c, pins::KEYPAD_I2C_ADDR);
    if keypad.init(4, 4).is_err() {
        log::error!("Keypad not found — halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }
    info!("Keypad initialized");

    // ── 4. Window stepper + LEDs ──────────────────────────────
    let stepper = WindowStepper::new(
        [
            PinDriver::output(peripherals.pins.gpio2.downgrade_output())?,
            PinDriver::output(peripherals.pins.gpio15.downgrade_output())?,
            PinDriver::output(peripherals.pins.gpio16.downgrade_output())?,
            PinDriver::output(peripherals.pins.gpio18.downgrade_output())?,
        ],
        Delay::new_default(),
    );

    let mut hw = HardwareAdapter::new(
        DhtSensor::new(pins::DHT_GPIO),
        Lm393Sensor::new(pins::RAIN_ANALOG_GPIO, pins::RAIN_DIGITAL_GPIO),
        keypad,
        stepper,
        StatusLeds::new(),
    );

    // ── 5. Config (defaults on first boot; session store) ─────
    let config_store = StoredConfig::new(MemoryStorage::new());
    let config = config_store.load_or_default();
    let tick_ms = config.control_loop_interval_ms;

    // ── 6. Collaborators + service ────────────────────────────
    let clock = MonotonicClock::new();
    let mut cloud = CloudLink::new();
    let mut sink = LogEventSink::new();
    let mut service = MonitorService::new(config);

    service.start(&mut cloud, &mut sink);
    info!("System ready. Entering control loop.");

    // ── 7. Cooperative control loop ───────────────────────────
    // One tick runs to completion before the next; the samplers gate
    // themselves on the monotonic clock, so the sleep only sets the
    // polling granularity.
    loop {
        let now_ms = clock.now_ms();
        service.tick(now_ms, &mut hw, &mut cloud, &mut sink);
        FreeRtos::delay_ms(tick_ms);
    }
}
