//! Trapezoidal step generation.
//!
//! Incremental constant-acceleration step scheduler. Each call to
//! [`StepGenerator::poll`] makes at most one step decision: a pulse is
//! emitted only when the inter-step interval for the current instantaneous
//! speed has elapsed. Speeds ramp at the configured acceleration up to the
//! configured maximum, cruise, and decelerate to stop exactly on target.
//!
//! A separate constant-speed mode ([`StepGenerator::set_speed`] +
//! [`StepGenerator::poll_at_constant_speed`]) bypasses acceleration
//! planning; the homing sequencer uses it to creep onto the limit switch.

use core::time::Duration;

use libm::{fabsf, sqrtf};

use crate::config::units::{Steps, StepsPerSec, StepsPerSecSquared};
use crate::motion::device::{StepContext, StepDevice};
use crate::motion::position::Position;

/// Step interval correction factor for the first step off the ramp
/// (David Austin's equation 15).
const FIRST_STEP_CORRECTION: f32 = 0.676;

const NANOS_PER_SEC: f32 = 1_000_000_000.0;

/// Trapezoidal-profile step generator for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct StepGenerator {
    /// Speed ceiling in steps/sec.
    max_speed: f32,

    /// Acceleration/deceleration rate in steps/sec².
    acceleration: f32,

    /// Absolute position belief, updated on every emitted pulse.
    position: Position,

    /// Commanded target position in steps.
    target: i64,

    /// Current signed speed in steps/sec.
    speed: f32,

    /// Interval until the next step is due. Zero means no step pending.
    step_interval: Duration,

    /// Time of the most recent emitted pulse.
    last_step_time: Duration,

    /// Ramp step counter: positive while accelerating, negative while
    /// decelerating, zero at rest.
    step_counter: i64,

    /// First-step interval off the ramp, derived from acceleration.
    initial_step_size: Duration,

    /// Most recent ramp interval.
    last_step_size: Duration,

    /// Interval floor derived from `max_speed`.
    min_step_size: Duration,
}

impl StepGenerator {
    /// Create a generator with the given speed and acceleration caps.
    pub fn new(max_speed: StepsPerSec, acceleration: StepsPerSecSquared) -> Self {
        let mut generator = StepGenerator {
            max_speed: 1.0,
            acceleration: 0.0,
            position: Position::new(),
            target: 0,
            speed: 0.0,
            step_interval: Duration::ZERO,
            last_step_time: Duration::ZERO,
            step_counter: 0,
            initial_step_size: Duration::ZERO,
            last_step_size: Duration::ZERO,
            min_step_size: Duration::ZERO,
        };

        generator.set_max_speed(max_speed);
        generator.set_acceleration(acceleration);
        generator
    }

    /// Move to an absolute position relative to the homing zero.
    ///
    /// A target equal to the current target is a no-op. Retargeting
    /// mid-move is allowed: the profile replans from the current speed,
    /// reversing through a controlled deceleration if needed.
    #[inline]
    pub fn move_to(&mut self, target: Steps) {
        if self.target != target.value() {
            self.target = target.value();
            self.compute_new_speed();
        }
    }

    /// Move by a signed number of steps from the current position.
    #[inline]
    pub fn move_by(&mut self, delta: i64) {
        self.move_to(Steps(self.position.steps().value() + delta));
    }

    /// Set the maximum permitted speed in steps/sec.
    pub fn set_max_speed(&mut self, steps_per_sec: StepsPerSec) {
        debug_assert!(steps_per_sec.0 > 0.0);

        self.max_speed = steps_per_sec.0;
        self.min_step_size = duration_from_secs(steps_per_sec.0.recip());
    }

    /// Get the maximum speed.
    #[inline]
    pub fn max_speed(&self) -> StepsPerSec {
        StepsPerSec(self.max_speed)
    }

    /// Set the acceleration/deceleration rate in steps/sec².
    pub fn set_acceleration(&mut self, acceleration: StepsPerSecSquared) {
        if acceleration.0 == 0.0 {
            return;
        }

        let acceleration = fabsf(acceleration.0);

        if fabsf(self.acceleration - acceleration) > f32::EPSILON {
            // Rescale the ramp counter so the profile continues smoothly
            // under the new rate (equation 17).
            self.step_counter =
                (self.step_counter as f32 * self.acceleration / acceleration) as i64;
            // New first-step interval (equation 7, corrected per equation 15).
            let initial_step_size = FIRST_STEP_CORRECTION * sqrtf(2.0 / acceleration);
            self.initial_step_size = duration_from_secs(initial_step_size);
            self.acceleration = acceleration;
            self.compute_new_speed();
        }
    }

    /// Get the acceleration/deceleration rate.
    #[inline]
    pub fn acceleration(&self) -> StepsPerSecSquared {
        StepsPerSecSquared(self.acceleration)
    }

    /// Set the desired constant speed in steps/sec, signed by direction.
    ///
    /// Clamped to ±max speed. Only honored by
    /// [`poll_at_constant_speed`](Self::poll_at_constant_speed);
    /// profiled polling recomputes speed from the ramp.
    pub fn set_speed(&mut self, speed: StepsPerSec) {
        if fabsf(speed.0 - self.speed) < f32::EPSILON {
            return;
        }

        let speed = speed.0.clamp(-self.max_speed, self.max_speed);

        if speed == 0.0 || !speed.is_finite() {
            self.step_interval = Duration::ZERO;
        } else {
            let interval_nanos = fabsf(NANOS_PER_SEC / speed);
            self.step_interval = Duration::from_nanos(interval_nanos as u64);
        }

        self.speed = speed;
    }

    /// Current signed speed in steps/sec.
    #[inline]
    pub fn velocity(&self) -> StepsPerSec {
        StepsPerSec(self.speed)
    }

    /// Steps remaining until the target. Zero means idle.
    #[inline]
    pub fn distance_to_go(&self) -> Steps {
        Steps(self.target - self.position.steps().value())
    }

    /// Whether the generator has no outstanding target.
    ///
    /// New indexed move requests are accepted only in this state.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.distance_to_go().value() == 0
    }

    /// Get the most recently commanded target position.
    #[inline]
    pub fn target_position(&self) -> Steps {
        Steps(self.target)
    }

    /// Get the current position, as measured by counting emitted pulses.
    ///
    /// Open-loop: there is no guarantee the mechanics actually followed.
    #[inline]
    pub fn current_position(&self) -> Steps {
        self.position.steps()
    }

    /// Redefine the current location as `position`.
    ///
    /// Clears any outstanding target and stops the ramp. The homing
    /// sequencer uses this twice: once at switch contact and once at the
    /// logical home after backing off.
    pub fn set_current_position(&mut self, position: Steps) {
        self.position.set_steps(position);
        self.target = position.value();
        self.step_interval = Duration::ZERO;
        self.speed = 0.0;
        self.step_counter = 0;
    }

    /// Poll the generator and step if a step is due, following the
    /// trapezoidal profile toward the target.
    ///
    /// Call as often as possible, at least once per minimum step interval.
    /// Each call makes at most one step. Returns whether a pulse was
    /// emitted.
    pub fn poll<D>(&mut self, device: &mut D, now: Duration) -> Result<bool, D::Error>
    where
        D: StepDevice,
    {
        let stepped = self.poll_at_constant_speed(device, now)?;
        if stepped {
            self.compute_new_speed();
        }
        Ok(stepped)
    }

    /// Poll the generator and step if a step is due, at the fixed rate set
    /// by the most recent [`set_speed`](Self::set_speed) call.
    pub fn poll_at_constant_speed<D>(
        &mut self,
        device: &mut D,
        now: Duration,
    ) -> Result<bool, D::Error>
    where
        D: StepDevice,
    {
        // Nothing due without a step interval.
        if self.step_interval.is_zero() {
            return Ok(false);
        }

        if now.saturating_sub(self.last_step_time) >= self.step_interval {
            let direction = if self.speed < 0.0 { -1 } else { 1 };
            // A failed step must not update internal state.
            let new_position = self.position.steps().value() + direction;

            let ctx = StepContext {
                position: new_position,
                step_time: now,
            };
            device.step(&ctx)?;

            self.position.set_steps(Steps(new_position));
            self.last_step_time = now;

            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Recompute speed and interval after a step or a retarget.
    ///
    /// Direct implementation of the AccelStepper ramp: the step counter is
    /// positive while accelerating, flips to the negative stopping distance
    /// when it is time to decelerate, and the interval converges on
    /// `min_step_size` at cruise.
    fn compute_new_speed(&mut self) {
        let distance_to = self.distance_to_go().value();
        let distance_to_stop = (self.speed * self.speed) / (2.0 * self.acceleration);
        let steps_to_stop = round(distance_to_stop) as i64;

        if distance_to == 0 && steps_to_stop <= 1 {
            // At the target and slow enough to stop.
            self.step_interval = Duration::ZERO;
            self.speed = 0.0;
            self.step_counter = 0;
            return;
        }

        if distance_to > 0 {
            // Target ahead.
            if self.step_counter > 0 {
                // Accelerating: time to decelerate, or moving the wrong way?
                if steps_to_stop >= distance_to || distance_to < 0 {
                    self.step_counter = -steps_to_stop;
                }
            } else if self.step_counter < 0 {
                // Decelerating: room to accelerate again?
                if steps_to_stop < distance_to && distance_to > 0 {
                    self.step_counter = -self.step_counter;
                }
            }
        } else if distance_to < 0 {
            // Past the target, need to reverse.
            if self.step_counter > 0 {
                if steps_to_stop >= -distance_to || distance_to > 0 {
                    self.step_counter = -steps_to_stop;
                }
            } else if self.step_counter < 0 {
                if steps_to_stop < -distance_to && distance_to < 0 {
                    self.step_counter = -self.step_counter;
                }
            }
        }

        if self.step_counter == 0 {
            // First step after having stopped.
            self.last_step_size = self.initial_step_size;
        } else {
            // Subsequent ramp step; works for both signs of the counter
            // (equation 13).
            let last = duration_as_secs(self.last_step_size);
            let last = last - last * 2.0 / ((4.0 * self.step_counter as f32) + 1.0);
            self.last_step_size = duration_from_secs(last);
            if self.last_step_size < self.min_step_size {
                self.last_step_size = self.min_step_size;
            }
        }

        self.step_counter += 1;
        self.step_interval = self.last_step_size;
        self.speed = duration_as_secs(self.last_step_size).recip();

        if distance_to < 0 {
            self.speed = -self.speed;
        }
    }
}

#[inline]
fn duration_from_secs(secs: f32) -> Duration {
    Duration::from_nanos((secs * NANOS_PER_SEC) as u64)
}

#[inline]
fn duration_as_secs(duration: Duration) -> f32 {
    duration.as_secs() as f32 + duration.subsec_nanos() as f32 / NANOS_PER_SEC
}

#[inline]
fn round(value: f32) -> f32 {
    libm::roundf(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::device::func_device;
    use core::cell::Cell;

    fn generator() -> StepGenerator {
        StepGenerator::new(StepsPerSec(800.0), StepsPerSecSquared(400.0))
    }

    /// Run the profiled poll until idle, advancing a simulated clock.
    fn run_to_idle(generator: &mut StepGenerator) -> (u64, u64) {
        let mut forward = 0u64;
        let mut backward = 0u64;
        let mut device = func_device(|| forward += 1, || backward += 1);

        let mut now = Duration::ZERO;
        for _ in 0..1_000_000 {
            if generator.is_idle() && generator.velocity().value() == 0.0 {
                break;
            }
            let _ = generator.poll(&mut device, now).unwrap();
            now += Duration::from_millis(1);
        }

        drop(device);
        (forward, backward)
    }

    #[test]
    fn test_converges_exactly_on_target() {
        let mut generator = generator();
        generator.move_to(Steps(1440));

        let (forward, backward) = run_to_idle(&mut generator);

        assert_eq!(generator.current_position().value(), 1440);
        assert_eq!(generator.distance_to_go().value(), 0);
        // Net steps match even if the profile overshot and corrected.
        assert_eq!(forward as i64 - backward as i64, 1440);
    }

    #[test]
    fn test_reverse_move() {
        let mut generator = generator();
        generator.move_to(Steps(-200));

        let (forward, backward) = run_to_idle(&mut generator);

        assert_eq!(generator.current_position().value(), -200);
        assert_eq!(backward as i64 - forward as i64, 200);
    }

    #[test]
    fn test_move_to_current_target_is_noop() {
        let mut generator = generator();
        let steps = Cell::new(0);
        let mut device = func_device(|| steps.set(steps.get() + 1), || steps.set(steps.get() + 1));

        generator.move_to(Steps(0));
        for i in 0..100 {
            generator
                .poll(&mut device, Duration::from_millis(i))
                .unwrap();
        }

        drop(device);
        assert_eq!(steps.get(), 0);
        assert!(generator.is_idle());
    }

    #[test]
    fn test_midflight_retarget_overwrites() {
        let mut generator = generator();
        let mut device = func_device(|| {}, || {});

        generator.move_to(Steps(10_000));
        let mut now = Duration::ZERO;
        for _ in 0..300 {
            generator.poll(&mut device, now).unwrap();
            now += Duration::from_millis(1);
        }
        assert!(!generator.is_idle());

        // Overwrite the in-flight target, as the plunger axis allows.
        generator.move_to(Steps(2_000));
        assert_eq!(generator.target_position().value(), 2_000);

        for _ in 0..1_000_000 {
            if generator.is_idle() && generator.velocity().value() == 0.0 {
                break;
            }
            generator.poll(&mut device, now).unwrap();
            now += Duration::from_millis(1);
        }

        assert_eq!(generator.current_position().value(), 2_000);
    }

    #[test]
    fn test_constant_speed_direction_follows_sign() {
        let mut generator = generator();
        let mut forward = 0u64;
        let mut backward = 0u64;
        let mut device = func_device(|| forward += 1, || backward += 1);

        generator.set_speed(StepsPerSec(-200.0));
        let mut now = Duration::ZERO;
        for _ in 0..100 {
            generator.poll_at_constant_speed(&mut device, now).unwrap();
            now += Duration::from_millis(5); // exactly one 200 Hz period
        }

        drop(device);
        assert_eq!(forward, 0);
        assert!(backward > 90);
        assert!(generator.current_position().value() < 0);
    }

    #[test]
    fn test_constant_speed_is_clamped_to_max() {
        let mut generator = generator();
        generator.set_speed(StepsPerSec(5_000.0));
        assert!((generator.velocity().value() - 800.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_set_current_position_clears_target_and_speed() {
        let mut generator = generator();
        generator.move_to(Steps(500));
        assert!(!generator.is_idle());

        generator.set_current_position(Steps(0));
        assert!(generator.is_idle());
        assert_eq!(generator.velocity().value(), 0.0);
        assert_eq!(generator.target_position().value(), 0);
    }

    #[test]
    fn test_no_step_when_already_at_target() {
        let mut generator = generator();
        let steps = Cell::new(0);
        let mut device = func_device(|| steps.set(steps.get() + 1), || steps.set(steps.get() + 1));

        for i in 0..100 {
            generator
                .poll(&mut device, Duration::from_millis(i))
                .unwrap();
        }

        drop(device);
        assert_eq!(steps.get(), 0);
    }
}
