//! Hardware drivers: peripheral init, keypad controller, window motor,
//! and status LEDs.  ESP-IDF specifics are cfg-gated per module.

pub mod hw_init;
pub mod status_led;
pub mod stepper;
pub mod tca8418;
