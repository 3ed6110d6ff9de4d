//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::axis::AxisConfig;
use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Axis dynamics are positive and the homing rate is non-zero
/// - Each axis is exactly one of rotary (`station_count`) or linear
///   (`lead_mm_per_rev`)
/// - Station count divides the steps per revolution evenly
/// - Travel limits are valid (min < max) and only on linear axes
/// - Sampler routing references existing axes of the right kind
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, axis) in config.axes.iter() {
        validate_axis(name.as_str(), axis)?;
    }

    if let Some(ref sampler) = config.sampler {
        let carousel = config.axis(sampler.carousel.as_str()).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(sampler.carousel.clone()))
        })?;
        if !carousel.is_rotary() {
            return Err(Error::Config(ConfigError::WrongAxisKind {
                axis: sampler.carousel.clone(),
                expected: "rotary",
            }));
        }

        let plunger = config.axis(sampler.plunger.as_str()).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(sampler.plunger.clone()))
        })?;
        if !plunger.is_linear() {
            return Err(Error::Config(ConfigError::WrongAxisKind {
                axis: sampler.plunger.clone(),
                expected: "linear",
            }));
        }
    }

    Ok(())
}

fn validate_axis(name: &str, config: &AxisConfig) -> Result<()> {
    let name_str = || -> heapless::String<32> { heapless::String::try_from(name).unwrap_or_default() };

    if config.max_speed.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(
            config.max_speed.0,
        )));
    }

    if config.acceleration.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidAcceleration(
            config.acceleration.0,
        )));
    }

    // Homing rate carries its direction in the sign but must be neither
    // zero nor faster than the axis allows.
    let homing_speed = config.homing.speed.0;
    if homing_speed == 0.0 || libm::fabsf(homing_speed) > config.max_speed.0 {
        return Err(Error::Config(ConfigError::InvalidHomingSpeed(homing_speed)));
    }

    if config.homing.backoff_steps <= 0 {
        return Err(Error::Config(ConfigError::InvalidBackoff(
            config.homing.backoff_steps,
        )));
    }

    match (config.station_count, config.lead_mm_per_rev) {
        (None, None) => {
            return Err(Error::Config(ConfigError::MissingAxisKind(name_str())));
        }
        (Some(_), Some(_)) => {
            return Err(Error::Config(ConfigError::AmbiguousAxisKind(name_str())));
        }
        (Some(stations), None) => {
            let steps_per_revolution = config.total_steps_per_revolution();
            if stations == 0 || steps_per_revolution % stations as u32 != 0 {
                return Err(Error::Config(ConfigError::InvalidStationCount {
                    stations,
                    steps_per_revolution,
                }));
            }
            if config.homing.home_station >= stations {
                return Err(Error::Config(ConfigError::InvalidHomeStation {
                    station: config.homing.home_station,
                    stations,
                }));
            }
        }
        (None, Some(lead)) => {
            if lead <= 0.0 {
                return Err(Error::Config(ConfigError::InvalidLeadScrew(lead)));
            }
        }
    }

    if let Some(ref travel) = config.travel {
        if config.is_rotary() {
            return Err(Error::Config(ConfigError::TravelLimitsUnsupported(
                name_str(),
            )));
        }
        if !travel.is_valid() {
            return Err(Error::Config(ConfigError::InvalidTravelLimits {
                min: travel.min.0,
                max: travel.max.0,
            }));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microsteps, StepsPerSec, StepsPerSecSquared};
    use crate::config::HomingConfig;

    fn base_axis() -> AxisConfig {
        AxisConfig {
            name: heapless::String::try_from("carousel").unwrap(),
            steps_per_revolution: 200,
            microsteps: Microsteps::EIGHTH,
            max_speed: StepsPerSec(800.0),
            acceleration: StepsPerSecSquared(400.0),
            invert_direction: false,
            homing: HomingConfig {
                speed: StepsPerSec(-200.0),
                backoff_steps: 20,
                min_contact_ms: 0,
                timeout_ms: 30_000,
                home_station: 0,
            },
            station_count: Some(10),
            lead_mm_per_rev: None,
            travel: None,
        }
    }

    #[test]
    fn test_valid_rotary_axis() {
        assert!(validate_axis("carousel", &base_axis()).is_ok());
    }

    #[test]
    fn test_homing_speed_exceeding_max() {
        let mut axis = base_axis();
        axis.homing.speed = StepsPerSec(-2000.0);

        let result = validate_axis("carousel", &axis);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidHomingSpeed(_)))
        ));
    }

    #[test]
    fn test_uneven_station_division() {
        let mut axis = base_axis();
        axis.station_count = Some(7); // 1600 % 7 != 0

        let result = validate_axis("carousel", &axis);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidStationCount { .. }))
        ));
    }

    #[test]
    fn test_axis_kind_must_be_unambiguous() {
        let mut axis = base_axis();
        axis.lead_mm_per_rev = Some(8.0);

        let result = validate_axis("carousel", &axis);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::AmbiguousAxisKind(_)))
        ));

        let mut axis = base_axis();
        axis.station_count = None;

        let result = validate_axis("carousel", &axis);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingAxisKind(_)))
        ));
    }

    #[test]
    fn test_home_station_out_of_range() {
        let mut axis = base_axis();
        axis.homing.home_station = 10;

        let result = validate_axis("carousel", &axis);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidHomeStation { .. }))
        ));
    }
}
