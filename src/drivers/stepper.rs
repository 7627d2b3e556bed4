//! Stepper-motor window actuator (28BYJ-48 on a ULN2003 breakout).
//!
//! Proof-of-concept drive: the motor runs a fixed half-step travel
//! between "open" and "closed" and then releases the coils.  Generic
//! over [`embedded_hal::digital::OutputPin`] and
//! [`embedded_hal::delay::DelayNs`], so the same driver runs against
//! esp-idf-hal pin drivers on target and mock pins in tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::policy::WindowState;

/// Half-step energisation sequence for IN1..IN4.
const HALF_STEP: [[bool; 4]; 8] = [
    [true, false, false, false],
    [true, true, false, false],
    [false, true, false, false],
    [false, true, true, false],
    [false, false, true, false],
    [false, false, true, true],
    [false, false, false, true],
    [true, false, false, true],
];

/// Half-steps for the full open↔closed travel (one shaft revolution).
const TRAVEL_STEPS: u32 = 4096;
/// Pause between half-steps — the 28BYJ-48 stalls much below 1 ms.
const STEP_DELAY_US: u32 = 1200;

pub struct WindowStepper<P, D> {
    coils: [P; 4],
    delay: D,
    /// Last commanded position; a repeat command is a no-op so the
    /// motor does not grind against the end stop.
    position: Option<WindowState>,
}

impl<P: OutputPin, D: DelayNs> WindowStepper<P, D> {
    pub fn new(coils: [P; 4], delay: D) -> Self {
        Self {
            coils,
            delay,
            position: None,
        }
    }

    /// Current commanded position (`None` before the first drive).
    pub fn position(&self) -> Option<WindowState> {
        self.position
    }

    /// Run the full travel to `target`.  Blocking for the travel
    /// duration; a no-op when already there.
    pub fn drive(&mut self, target: WindowState) -> Result<(), P::Error> {
        if self.position == Some(target) {
            return Ok(());
        }

        for step in 0..TRAVEL_STEPS {
            let phase = match target {
                // Opening winds the spool forward, closing unwinds.
                WindowState::Open => (step % 8) as usize,
                WindowState::Closed => (7 - step % 8) as usize,
            };
            self.apply_phase(HALF_STEP[phase])?;
            self.delay.delay_us(STEP_DELAY_US);
        }

        // Release the coils — holding torque is not needed and the
        // motor heats up quickly when energised.
        self.apply_phase([false; 4])?;
        self.position = Some(target);
        Ok(())
    }

    fn apply_phase(&mut self, phase: [bool; 4]) -> Result<(), P::Error> {
        for (coil, &on) in self.coils.iter_mut().zip(phase.iter()) {
            if on {
                coil.set_high()?;
            } else {
                coil.set_low()?;
            }
        }
        Ok(())
    }
}
