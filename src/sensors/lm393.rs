//! LM393 rain sensor (resistive panel + differential comparator).
//!
//! Two channels: the raw panel voltage on an ADC pin, and the
//! comparator's digital output.  The comparator is active-low — a dry
//! panel reads 1, a wet panel reads 0 — and is the only channel trusted
//! for wetness (the ADC input is weighted heavily towards 4095).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 + GPIO via hw_init.
//! On host/test: reads injectable simulation statics (defaults to dry).

use core::sync::atomic::{AtomicBool, AtomicU16};
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

static SIM_ANALOG: AtomicU16 = AtomicU16::new(4095);
static SIM_DRY: AtomicBool = AtomicBool::new(true);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_rain(analog: u16, dry: bool) {
    SIM_ANALOG.store(analog, Ordering::Relaxed);
    SIM_DRY.store(dry, Ordering::Relaxed);
}

pub struct Lm393Sensor {
    _analog_gpio: i32,
    _digital_gpio: i32,
}

impl Lm393Sensor {
    pub fn new(analog_gpio: i32, digital_gpio: i32) -> Self {
        Self {
            _analog_gpio: analog_gpio,
            _digital_gpio: digital_gpio,
        }
    }

    /// Raw panel level, 0..=4095.
    #[cfg(target_os = "espidf")]
    pub fn read_analog(&mut self) -> u16 {
        hw_init::adc1_read(pins::RAIN_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_analog(&mut self) -> u16 {
        SIM_ANALOG.load(Ordering::Relaxed)
    }

    /// Comparator output: `true` = dry.
    #[cfg(target_os = "espidf")]
    pub fn read_digital_dry(&mut self) -> bool {
        hw_init::gpio_read(self._digital_gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_digital_dry(&mut self) -> bool {
        SIM_DRY.load(Ordering::Relaxed)
    }
}
