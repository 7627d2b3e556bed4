//! Status LED drivers.
//!
//! Two indicators on the carrier PCB: a plain green LED that mirrors the
//! window position, and a discrete RGB LED showing the temperature band
//! (blue = below the lower limit, green = within limits, red = above).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: three LEDC PWM channels for the RGB LED, one GPIO for the
//! window LED.  On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct StatusLeds {
    rgb: (u8, u8, u8),
    window_open: bool,
}

impl Default for StatusLeds {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLeds {
    pub fn new() -> Self {
        Self {
            rgb: (0, 0, 0),
            window_open: false,
        }
    }

    pub fn set_temp_colour(&mut self, r: u8, g: u8, b: u8) {
        hw_init::ledc_set(hw_init::LEDC_CH_LED_R, r);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_G, g);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_B, b);
        self.rgb = (r, g, b);
    }

    pub fn set_window(&mut self, open: bool) {
        hw_init::gpio_write(pins::WINDOW_LED_GPIO, open);
        self.window_open = open;
    }

    pub fn current_colour(&self) -> (u8, u8, u8) {
        self.rgb
    }

    pub fn window_lit(&self) -> bool {
        self.window_open
    }
}
