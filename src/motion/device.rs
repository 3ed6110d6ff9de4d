//! Step output boundary.

use core::convert::Infallible;
use core::time::Duration;

/// Everything a device needs to realize one step pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    /// Absolute position after this step, in steps. The sign of the
    /// change from the previous context gives the direction.
    pub position: i64,
    /// Time the step was scheduled, per the control loop's clock.
    pub step_time: Duration,
}

/// An interface to the physical step driver.
pub trait StepDevice {
    /// The type of error that may be encountered when taking a step.
    type Error;

    /// Emit one step pulse.
    fn step(&mut self, ctx: &StepContext) -> Result<(), Self::Error>;
}

/// A [`StepDevice`] which calls one function for a forward step and
/// another for a backward one. Handy for tests and simulation.
pub fn func_device<F, B, T>(forward: F, backward: B) -> impl StepDevice<Error = Infallible>
where
    F: FnMut() -> T,
    B: FnMut() -> T,
{
    FuncDevice {
        forward,
        backward,
        previous_position: 0,
    }
}

struct FuncDevice<F, B> {
    previous_position: i64,
    forward: F,
    backward: B,
}

impl<F, B, T> StepDevice for FuncDevice<F, B>
where
    F: FnMut() -> T,
    B: FnMut() -> T,
{
    type Error = Infallible;

    #[inline]
    fn step(&mut self, ctx: &StepContext) -> Result<(), Self::Error> {
        let diff = ctx.position - self.previous_position;

        if diff > 0 {
            (self.forward)();
        } else if diff < 0 {
            (self.backward)();
        }

        self.previous_position = ctx.position;
        Ok(())
    }
}
