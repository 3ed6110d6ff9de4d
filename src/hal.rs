//! embedded-hal 1.0 step drivers.
//!
//! Adapts a STEP/DIR pin pair (TB6600-style driver input) to the
//! [`StepDevice`] seam, plus a wrapper for the driver's active-low enable
//! line.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::motion::{StepContext, StepDevice};

/// STEP pulse width in microseconds. TB6600-class opto-isolated inputs
/// need at least ~2 µs.
const STEP_PULSE_WIDTH_US: u32 = 2;

/// A [`StepDevice`] driving dedicated STEP and DIR pins.
///
/// The direction pin is written only when the direction changes; the step
/// pin is pulsed once per step with a short busy-wait for the pulse width.
pub struct StepDirPins<STEP, DIR, DELAY> {
    step: STEP,
    dir: DIR,
    delay: DELAY,
    invert_direction: bool,
    previous_position: i64,
    dir_pin_high: Option<bool>,
}

impl<STEP, DIR, DELAY> StepDirPins<STEP, DIR, DELAY> {
    /// Create a new adapter around a STEP pin, a DIR pin, and a delay
    /// provider for the pulse width.
    pub fn new(step: STEP, dir: DIR, delay: DELAY) -> Self {
        Self {
            step,
            dir,
            delay,
            invert_direction: false,
            previous_position: 0,
            dir_pin_high: None,
        }
    }

    /// Invert the direction pin logic (wiring-dependent).
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Release the pins.
    pub fn into_inner(self) -> (STEP, DIR, DELAY) {
        (self.step, self.dir, self.delay)
    }
}

impl<STEP, DIR, DELAY, E> StepDevice for StepDirPins<STEP, DIR, DELAY>
where
    STEP: OutputPin<Error = E>,
    DIR: OutputPin<Error = E>,
    DELAY: DelayNs,
{
    type Error = E;

    fn step(&mut self, ctx: &StepContext) -> Result<(), Self::Error> {
        let delta = ctx.position - self.previous_position;
        if delta == 0 {
            return Ok(());
        }

        let dir_high = (delta > 0) != self.invert_direction;
        if self.dir_pin_high != Some(dir_high) {
            if dir_high {
                self.dir.set_high()?;
            } else {
                self.dir.set_low()?;
            }
            self.dir_pin_high = Some(dir_high);
        }

        self.step.set_high()?;
        self.delay.delay_us(STEP_PULSE_WIDTH_US);
        self.step.set_low()?;

        self.previous_position = ctx.position;
        Ok(())
    }
}

/// Active-low driver enable line.
pub struct DriverEnable<PIN> {
    pin: PIN,
}

impl<PIN: OutputPin> DriverEnable<PIN> {
    /// Wrap an enable pin.
    pub fn new(pin: PIN) -> Self {
        Self { pin }
    }

    /// Energize the driver (pin low).
    pub fn enable(&mut self) -> Result<(), PIN::Error> {
        self.pin.set_low()
    }

    /// De-energize the driver (pin high).
    pub fn disable(&mut self) -> Result<(), PIN::Error> {
        self.pin.set_high()
    }

    /// Release the pin.
    pub fn into_inner(self) -> PIN {
        self.pin
    }
}
