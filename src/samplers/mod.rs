//! Interval-gated sensor samplers.
//!
//! Each sampler owns its own [`IntervalTimer`](crate::timing::IntervalTimer)
//! and its last accepted value, and is driven once per control tick.  The
//! weather and rain periods are deliberately independent.

pub mod rain;
pub mod weather;

pub use rain::{RainSampler, RainState};
pub use weather::{Reading, WeatherSampler};
