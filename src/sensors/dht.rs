//! DHT22 temperature/humidity sensor (single-wire serial, bit-banged).
//!
//! The host pulls the open-drain line low for ≥1 ms to request a
//! conversion; the sensor answers with an 80 µs low / 80 µs high
//! preamble and 40 data bits.  Each bit starts with ~50 µs low, and the
//! length of the following high phase encodes the value (~26 µs = 0,
//! ~70 µs = 1).  Frame layout: humidity ×10 (u16), temperature ×10
//! (u16, sign in the top bit), checksum.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the data GPIO with µs busy-waits.
//! On host/test: reads from injectable atomics (NaN injectable too).
//!
//! A failed read returns NaN on both channels — the sampler treats NaN
//! as "discard and retry next tick".

use core::sync::atomic::AtomicU32;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use log::warn;

static SIM_TEMP_C: AtomicU32 = AtomicU32::new(0x41A8_0000); // 21.0f32
static SIM_HUMIDITY: AtomicU32 = AtomicU32::new(0x4248_0000); // 50.0f32

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_weather(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_C.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUMIDITY.store(humidity_pct.to_bits(), Ordering::Relaxed);
}

/// High-phase widths above this many µs decode as a 1 bit.
#[cfg(target_os = "espidf")]
const BIT_THRESHOLD_US: u32 = 48;
/// Longest any single protocol phase may take before the read aborts.
#[cfg(target_os = "espidf")]
const PHASE_TIMEOUT_US: u32 = 200;

/// One decoded (temperature °C, humidity %) pair.
#[derive(Debug, Clone, Copy)]
pub struct DhtReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl DhtReading {
    /// Failed-transfer marker: NaN on both channels.
    pub const INVALID: Self = Self {
        temperature_c: f32::NAN,
        humidity_pct: f32::NAN,
    };
}

pub struct DhtSensor {
    _gpio: i32,
}

impl DhtSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// Read one sample.  NaN on both channels if the transfer failed.
    pub fn read(&mut self) -> DhtReading {
        self.read_impl()
    }

    #[cfg(target_os = "espidf")]
    fn read_impl(&mut self) -> DhtReading {
        match self.read_frame() {
            Some(frame) => match decode_frame(frame) {
                Some((temperature_c, humidity_pct)) => DhtReading {
                    temperature_c,
                    humidity_pct,
                },
                None => {
                    warn!("DHT checksum mismatch");
                    DhtReading::INVALID
                }
            },
            None => DhtReading::INVALID,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_impl(&mut self) -> DhtReading {
        DhtReading {
            temperature_c: f32::from_bits(SIM_TEMP_C.load(Ordering::Relaxed)),
            humidity_pct: f32::from_bits(SIM_HUMIDITY.load(Ordering::Relaxed)),
        }
    }

    /// Clock in the 40-bit frame.  `None` on any phase timeout.
    #[cfg(target_os = "espidf")]
    fn read_frame(&mut self) -> Option<[u8; 5]> {
        let pin = self._gpio;

        // Start pulse: ≥1 ms low, then release to the pull-up.
        hw_init::gpio_write(pin, false);
        hw_init::delay_us(1100);
        hw_init::gpio_write(pin, true);

        // Sensor preamble: low, then high, then the first bit's low phase.
        wait_level(pin, false, PHASE_TIMEOUT_US)?;
        wait_level(pin, true, PHASE_TIMEOUT_US)?;
        wait_level(pin, false, PHASE_TIMEOUT_US)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            wait_level(pin, true, PHASE_TIMEOUT_US)?;
            let high_us = wait_level(pin, false, PHASE_TIMEOUT_US)?;
            if high_us > BIT_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Some(frame)
    }
}

/// Busy-wait until the line reaches `level`.  Returns the elapsed µs, or
/// `None` after `timeout_us`.
#[cfg(target_os = "espidf")]
fn wait_level(pin: i32, level: bool, timeout_us: u32) -> Option<u32> {
    let mut elapsed = 0u32;
    while hw_init::gpio_read(pin) != level {
        if elapsed >= timeout_us {
            return None;
        }
        hw_init::delay_us(1);
        elapsed += 1;
    }
    Some(elapsed)
}

/// Decode a 5-byte frame into (temperature °C, humidity %).
/// `None` on checksum mismatch.
pub fn decode_frame(frame: [u8; 5]) -> Option<(f32, f32)> {
    let sum = frame[0]
        .wrapping_add(frame[1])
        .wrapping_add(frame[2])
        .wrapping_add(frame[3]);
    if sum != frame[4] {
        return None;
    }

    let humidity = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
    let temp_raw = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);
    let mut temperature = f32::from(temp_raw) / 10.0;
    if frame[2] & 0x80 != 0 {
        temperature = -temperature;
    }
    Some((temperature, humidity))
}
