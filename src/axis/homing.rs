//! Homing sequencer.
//!
//! Establishes an absolute zero from an unknown start position: seek
//! toward the limit switch at constant speed, stop and zero on contact,
//! back off to a mechanical clearance, and zero again. The second zero is
//! the logical home all indexing is measured from.
//!
//! The sequencer is a non-blocking state machine ticked from the same
//! control loop as indexed moves; it owns the step generator while a
//! sequence is in flight.

use core::time::Duration;

use embedded_hal::digital::InputPin;

use crate::config::units::{Steps, StepsPerSec};
use crate::config::HomingConfig;
use crate::error::{AxisError, Error, HomingError, Result};
use crate::motion::{StepDevice, StepGenerator};

use super::switch::LimitSwitch;

/// Sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingState {
    /// No sequence requested.
    #[default]
    Idle,
    /// Running at constant speed toward the switch.
    Seeking,
    /// Switch hit; position zeroed at the contact point.
    Contacted,
    /// Trapezoidal move away from the switch in progress.
    BackingOff,
    /// Back-off finished and logical home zeroed.
    Complete,
    /// Seek deadline expired before the switch triggered.
    Failed,
}

/// Notable transitions surfaced to the caller for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingEvent {
    /// Switch contact made; backing off to clearance.
    Contacted,
    /// Logical home established.
    Complete,
}

/// Switch-referenced homing state machine for one axis.
#[derive(Debug, Clone)]
pub struct HomingSequencer {
    /// Signed seek speed, toward the switch.
    speed: StepsPerSec,
    /// Clearance distance past the switch release point.
    backoff_steps: i64,
    /// Seek deadline; `None` waits forever.
    timeout: Option<Duration>,
    state: HomingState,
    started_at: Duration,
}

impl HomingSequencer {
    /// Build a sequencer from axis homing configuration.
    pub fn from_config(config: &HomingConfig) -> Self {
        Self {
            speed: config.speed,
            backoff_steps: config.backoff_steps,
            timeout: match config.timeout_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms as u64)),
            },
            state: HomingState::Idle,
            started_at: Duration::ZERO,
        }
    }

    /// Current sequencer state.
    #[inline]
    pub fn state(&self) -> HomingState {
        self.state
    }

    /// Begin (or restart) a homing sequence.
    ///
    /// Allowed from any state; an in-flight target is discarded because
    /// the generator switches to constant-speed seeking.
    pub fn start(&mut self, generator: &mut StepGenerator, now: Duration) {
        generator.set_speed(self.speed);
        self.state = HomingState::Seeking;
        self.started_at = now;
    }

    /// Advance the sequence by one control-loop tick.
    ///
    /// At most one step pulse is emitted per call. Returns a transition
    /// event when one fired this tick.
    pub fn tick<D, PIN>(
        &mut self,
        generator: &mut StepGenerator,
        device: &mut D,
        switch: &mut LimitSwitch<PIN>,
        now: Duration,
    ) -> Result<Option<HomingEvent>>
    where
        D: StepDevice,
        PIN: InputPin,
    {
        match self.state {
            HomingState::Idle | HomingState::Complete | HomingState::Failed => Ok(None),

            HomingState::Seeking => {
                if switch
                    .triggered(now)
                    .map_err(|_| Error::Axis(AxisError::PinError))?
                {
                    // Stop at once; this position means "at the switch",
                    // not true zero.
                    generator.set_speed(StepsPerSec(0.0));
                    generator.set_current_position(Steps(0));
                    self.state = HomingState::Contacted;
                    return Ok(Some(HomingEvent::Contacted));
                }

                if let Some(timeout) = self.timeout {
                    let elapsed = now.saturating_sub(self.started_at);
                    if elapsed >= timeout {
                        generator.set_speed(StepsPerSec(0.0));
                        self.state = HomingState::Failed;
                        return Err(Error::Homing(HomingError::Timeout {
                            elapsed_ms: elapsed.as_millis() as u32,
                        }));
                    }
                }

                generator
                    .poll_at_constant_speed(device, now)
                    .map_err(|_| Error::Axis(AxisError::PinError))?;
                Ok(None)
            }

            HomingState::Contacted => {
                // Park at a safe clearance, releasing the switch.
                generator.move_to(Steps(self.backoff_steps));
                self.state = HomingState::BackingOff;
                Ok(None)
            }

            HomingState::BackingOff => {
                generator
                    .poll(device, now)
                    .map_err(|_| Error::Axis(AxisError::PinError))?;

                if generator.is_idle() && generator.velocity().value() == 0.0 {
                    // The clearance point is the logical home.
                    generator.set_current_position(Steps(0));
                    self.state = HomingState::Complete;
                    return Ok(Some(HomingEvent::Complete));
                }
                Ok(None)
            }
        }
    }
}
