//! GPIO / peripheral pin assignments for the window monitor board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Assignments match the Huzzah Feather carrier PCB.

// ---------------------------------------------------------------------------
// DHT22 temperature / humidity sensor
// ---------------------------------------------------------------------------

/// Single-wire data line of the DHT22 (external 10 kΩ pull-up).
pub const DHT_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// LM393 rain sensor
// ---------------------------------------------------------------------------

/// Analog output of the LM393 comparator board — ADC1 channel 0 (GPIO 36).
pub const RAIN_ANALOG_GPIO: i32 = 36;
/// ADC1 channel for the rain analog input.
pub const RAIN_ADC_CHANNEL: u32 = 0;
/// Digital comparator output. Active-low: LOW = panel wet, HIGH = dry.
pub const RAIN_DIGITAL_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Stepper motor (window actuator, ULN2003 breakout)
// ---------------------------------------------------------------------------

/// Half-step coil pins IN1–IN4, energised in sequence by the driver.
pub const STEPPER_IN1_GPIO: i32 = 2;
pub const STEPPER_IN2_GPIO: i32 = 15;
pub const STEPPER_IN3_GPIO: i32 = 16;
pub const STEPPER_IN4_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Status LEDs
// ---------------------------------------------------------------------------

/// Green LED: lit while the window is open.
pub const WINDOW_LED_GPIO: i32 = 5;

/// Discrete RGB LED for the temperature band (blue = below the lower
/// limit, green = within limits, red = above the upper limit).
pub const LED_R_GPIO: i32 = 25;
pub const LED_G_GPIO: i32 = 26;
pub const LED_B_GPIO: i32 = 27;

/// LEDC frequency for the RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;

// ---------------------------------------------------------------------------
// I²C bus (keypad controller + OLED display)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 23;
pub const I2C_SCL_GPIO: i32 = 22;

/// TCA8418 keypad matrix controller.
pub const KEYPAD_I2C_ADDR: u8 = 0x34;
/// SH1107 128×64 OLED.
pub const DISPLAY_I2C_ADDR: u8 = 0x3D;
