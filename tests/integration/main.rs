//! Host-side integration tests for the monitor core.
//!
//! Everything here runs on x86_64 against mock adapters — no hardware,
//! no ESP-IDF.  The `mock_hw` module records every port call so tests
//! can assert on the full interaction history of one or more ticks.

mod control_loop_tests;
mod mock_hw;
