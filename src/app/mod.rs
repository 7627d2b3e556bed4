//! Application layer: ports, events, commands, and the monitor service.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
