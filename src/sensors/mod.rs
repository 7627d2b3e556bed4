//! Hardware sensor drivers.
//!
//! Dual-target: on ESP-IDF each driver talks to the real peripheral; on
//! the host it reads from injectable simulation statics so the domain
//! core can be exercised without hardware.

pub mod dht;
pub mod lm393;
