//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns every sensor and actuator driver, exposing them through the
//! hardware-facing ports.  This is the only module in the system that
//! touches actual hardware; on non-espidf targets the underlying drivers
//! use cfg-gated simulation stubs.
//!
//! Generic over the I²C bus, stepper pins, and delay so the same adapter
//! wires esp-idf-hal drivers on target and mock peripherals in tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::{
    DisplayPort, KeypadPort, RainSensorPort, WeatherSensorPort, WindowPort,
};
use crate::drivers::status_led::StatusLeds;
use crate::drivers::stepper::WindowStepper;
use crate::drivers::tca8418::Tca8418;
use crate::keypad::RawScanCode;
use crate::policy::WindowState;
use crate::samplers::Reading;
use crate::sensors::dht::DhtSensor;
use crate::sensors::lm393::Lm393Sensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I2C, P, D> {
    dht: DhtSensor,
    rain: Lm393Sensor,
    keypad: Tca8418<I2C>,
    stepper: WindowStepper<P, D>,
    leds: StatusLeds,
}

impl<I2C: I2c, P: OutputPin, D: DelayNs> HardwareAdapter<I2C, P, D> {
    pub fn new(
        dht: DhtSensor,
        rain: Lm393Sensor,
        keypad: Tca8418<I2C>,
        stepper: WindowStepper<P, D>,
        leds: StatusLeds,
    ) -> Self {
        Self {
            dht,
            rain,
            keypad,
            stepper,
            leds,
        }
    }
}

// ── Sensor ports ──────────────────────────────────────────────

impl<I2C: I2c, P: OutputPin, D: DelayNs> WeatherSensorPort for HardwareAdapter<I2C, P, D> {
    fn read_temperature(&mut self) -> f32 {
        self.dht.read().temperature_c
    }

    fn read_humidity(&mut self) -> f32 {
        // The DHT delivers both channels in one frame; reading twice in a
        // row within the same tick is served from the same conversion on
        // real silicon (the part rate-limits itself to ~0.5 Hz).
        self.dht.read().humidity_pct
    }
}

impl<I2C: I2c, P: OutputPin, D: DelayNs> RainSensorPort for HardwareAdapter<I2C, P, D> {
    fn read_analog(&mut self) -> u16 {
        self.rain.read_analog()
    }

    fn read_digital_dry(&mut self) -> bool {
        self.rain.read_digital_dry()
    }
}

impl<I2C: I2c, P: OutputPin, D: DelayNs> KeypadPort for HardwareAdapter<I2C, P, D> {
    fn next_raw_event(&mut self) -> Option<RawScanCode> {
        match self.keypad.next_event() {
            Ok(event) => event,
            Err(_) => {
                warn!("keypad FIFO read failed");
                None
            }
        }
    }
}

// ── Actuation / output ports ──────────────────────────────────

impl<I2C: I2c, P: OutputPin, D: DelayNs> WindowPort for HardwareAdapter<I2C, P, D> {
    fn drive(&mut self, state: WindowState) {
        if let Err(e) = self.stepper.drive(state) {
            warn!("window drive failed: {e:?}");
        }
    }

    fn set_window_led(&mut self, open: bool) {
        self.leds.set_window(open);
    }

    fn set_temp_led(&mut self, r: u8, g: u8, b: u8) {
        self.leds.set_temp_colour(r, g, b);
    }
}

impl<I2C: I2c, P: OutputPin, D: DelayNs> DisplayPort for HardwareAdapter<I2C, P, D> {
    fn show_reading(&mut self, reading: &Reading) {
        // OLED pixel drawing is the renderer's concern; the monitor only
        // hands over the latest reading.
        info!(
            "display: {:.1} °C  {:.1} %",
            reading.temperature_c, reading.humidity_pct
        );
    }
}
