//! Builder pattern for Axis.

use core::time::Duration;

use embedded_hal::digital::InputPin;

use crate::config::{AxisConfig, AxisGeometry, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::{StepDevice, StepGenerator};

use super::homing::HomingSequencer;
use super::switch::LimitSwitch;
use super::Axis;

/// Builder for creating [`Axis`] instances.
pub struct AxisBuilder<DEV, PIN>
where
    DEV: StepDevice,
    PIN: InputPin,
{
    device: Option<DEV>,
    switch_pin: Option<PIN>,
    config: Option<AxisConfig>,
}

impl<DEV, PIN> Default for AxisBuilder<DEV, PIN>
where
    DEV: StepDevice,
    PIN: InputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DEV, PIN> AxisBuilder<DEV, PIN>
where
    DEV: StepDevice,
    PIN: InputPin,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            device: None,
            switch_pin: None,
            config: None,
        }
    }

    /// Set the step device (e.g. [`StepDirPins`](crate::hal::StepDirPins)).
    pub fn device(mut self, device: DEV) -> Self {
        self.device = Some(device);
        self
    }

    /// Set the limit switch input pin (pulled up, active low).
    pub fn switch(mut self, pin: PIN) -> Self {
        self.switch_pin = Some(pin);
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.config = Some(config.clone());
        self
    }

    /// Configure from SystemConfig by axis name.
    pub fn from_config(self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis_config = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(axis_config))
    }

    /// Build the Axis.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Axis<DEV, PIN>> {
        let device = self.device.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("device is required").unwrap_or_default(),
            ))
        })?;

        let switch_pin = self.switch_pin.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("switch is required").unwrap_or_default(),
            ))
        })?;

        let config = self.config.ok_or_else(|| {
            Error::Config(ConfigError::ParseError(
                heapless::String::try_from("axis config is required").unwrap_or_default(),
            ))
        })?;

        let geometry = AxisGeometry::from_config(&config);
        let generator = StepGenerator::new(config.max_speed, config.acceleration);
        let sequencer = HomingSequencer::from_config(&config.homing);
        let switch = LimitSwitch::new(switch_pin)
            .with_min_contact(Duration::from_millis(config.homing.min_contact_ms as u64));

        Ok(Axis::new(
            config.name.clone(),
            device,
            switch,
            generator,
            sequencer,
            geometry,
            config.homing.home_station,
        ))
    }
}
