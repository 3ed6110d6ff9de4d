//! Axis module for carousel-motion.
//!
//! One [`Axis`] per physical degree of motion, owning its step generator,
//! limit switch, homing sequencer, and (for the rotary disk) station
//! indexer. Both carousel axes are instances of this one type; only their
//! configuration differs.

mod builder;
mod homing;
mod indexing;
mod status;
mod switch;

pub use builder::AxisBuilder;
pub use homing::{HomingEvent, HomingSequencer, HomingState};
pub use indexing::{Advance, StationIndexer};
pub use status::HomingStatus;
pub use switch::LimitSwitch;

use core::time::Duration;

use embedded_hal::digital::InputPin;

use crate::config::units::{Millimeters, Steps, StepsPerSec};
use crate::config::AxisGeometry;
use crate::error::{AxisError, Error, Result};
use crate::motion::{StepDevice, StepGenerator};

/// One independently driven degree of motion.
///
/// Driven cooperatively: the control loop calls [`tick`](Axis::tick) once
/// per iteration, which makes at most one step decision. Commands arrive
/// between ticks, never concurrently with them.
pub struct Axis<DEV, PIN>
where
    DEV: StepDevice,
    PIN: InputPin,
{
    name: heapless::String<32>,
    device: DEV,
    switch: LimitSwitch<PIN>,
    generator: StepGenerator,
    sequencer: HomingSequencer,
    geometry: AxisGeometry,
    indexer: Option<StationIndexer>,
    home_station: u16,
    status: HomingStatus,
}

impl<DEV, PIN> Axis<DEV, PIN>
where
    DEV: StepDevice,
    PIN: InputPin,
{
    /// Start building an axis.
    pub fn builder() -> AxisBuilder<DEV, PIN> {
        AxisBuilder::new()
    }

    pub(crate) fn new(
        name: heapless::String<32>,
        device: DEV,
        switch: LimitSwitch<PIN>,
        generator: StepGenerator,
        sequencer: HomingSequencer,
        geometry: AxisGeometry,
        home_station: u16,
    ) -> Self {
        let indexer = geometry
            .station_count()
            .zip(geometry.steps_per_station())
            .map(|(count, steps)| StationIndexer::new(count, steps));

        Self {
            name,
            device,
            switch,
            generator,
            sequencer,
            geometry,
            indexer,
            home_station,
            status: HomingStatus::Unhomed,
        }
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current homing status.
    #[inline]
    pub fn status(&self) -> HomingStatus {
        self.status
    }

    /// Current absolute position in steps.
    #[inline]
    pub fn position(&self) -> Steps {
        self.generator.current_position()
    }

    /// Current signed speed in steps/sec.
    #[inline]
    pub fn velocity(&self) -> StepsPerSec {
        self.generator.velocity()
    }

    /// Steps remaining to the commanded target.
    #[inline]
    pub fn distance_to_go(&self) -> Steps {
        self.generator.distance_to_go()
    }

    /// Whether the generator has no outstanding target.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.generator.is_idle()
    }

    /// Station the disk currently presents, for rotary axes.
    #[inline]
    pub fn station(&self) -> Option<u16> {
        self.indexer.as_ref().map(|ix| ix.current())
    }

    /// The derived axis geometry.
    #[inline]
    pub fn geometry(&self) -> &AxisGeometry {
        &self.geometry
    }

    /// Begin (or restart) the homing sequence.
    ///
    /// Allowed from any state; any in-flight move target is discarded.
    pub fn begin_homing(&mut self, now: Duration) {
        self.status = HomingStatus::Homing;
        self.sequencer.start(&mut self.generator, now);
    }

    /// Drive the axis by one control-loop tick.
    ///
    /// During homing this advances the sequencer; otherwise it runs the
    /// step generator toward any outstanding target. At most one step
    /// pulse is emitted per call.
    pub fn tick(&mut self, now: Duration) -> Result<Option<HomingEvent>> {
        match self.status {
            HomingStatus::Homing => {
                let event = match self.sequencer.tick(
                    &mut self.generator,
                    &mut self.device,
                    &mut self.switch,
                    now,
                ) {
                    Ok(event) => event,
                    Err(e) => {
                        // A failed seek leaves the position untrusted.
                        self.status = HomingStatus::Unhomed;
                        return Err(e);
                    }
                };

                if event == Some(HomingEvent::Complete) {
                    self.status = HomingStatus::Homed;
                    if let Some(ix) = &mut self.indexer {
                        ix.reset(self.home_station);
                    }
                }
                Ok(event)
            }
            _ => {
                self.generator
                    .poll(&mut self.device, now)
                    .map_err(|_| Error::Axis(AxisError::PinError))?;
                Ok(None)
            }
        }
    }

    /// Request a move to the next station (rotary axes).
    ///
    /// Dropped requests are reported through the returned [`Advance`],
    /// never queued: mid-move requests and requests past the last station
    /// leave the index and target unchanged.
    pub fn advance(&mut self) -> Result<Advance> {
        let indexer = self
            .indexer
            .as_mut()
            .ok_or(Error::Axis(AxisError::NotIndexed))?;

        if self.status != HomingStatus::Homed {
            return Ok(Advance::NotHomed);
        }

        Ok(indexer.advance(&mut self.generator))
    }

    /// Command an absolute press depth (linear axes).
    ///
    /// Not idle-gated: a new depth overwrites an in-flight one and the
    /// generator replans from its current speed. Rejected while the axis
    /// is unhomed or homing, and when the target violates a `Reject`
    /// travel limit.
    pub fn move_to_depth(&mut self, depth: Millimeters) -> Result<Steps> {
        if self.status != HomingStatus::Homed {
            return Err(Error::Axis(AxisError::NotHomed));
        }

        let target = self
            .geometry
            .depth_target(depth)
            .ok_or(Error::Axis(AxisError::NotLinear))?;

        let target = match &self.geometry.limits {
            Some(limits) => match limits.apply(target.value()) {
                Some(applied) => Steps(applied),
                None => {
                    return Err(Error::Axis(AxisError::LimitExceeded {
                        position: target.value(),
                        limit: limits.violated_by(target.value()),
                    }));
                }
            },
            None => target,
        };

        self.generator.move_to(target);
        Ok(target)
    }
}
