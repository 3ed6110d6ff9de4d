//! Axis geometry derived from configuration.

use super::axis::AxisConfig;
use super::limits::StepLimits;
use super::units::{Millimeters, Steps};

/// What kind of logical positioning an axis supports.
#[derive(Debug, Clone)]
pub enum AxisKind {
    /// Station-indexed rotary disk.
    Rotary {
        /// Number of stations per revolution.
        station_count: u16,
        /// Whole steps between adjacent stations.
        steps_per_station: i64,
    },
    /// Lead screw linear actuator.
    Linear {
        /// Steps per millimeter of travel.
        steps_per_mm: f32,
    },
}

/// Derived geometric parameters computed from axis configuration.
///
/// Computed once at initialization and used for all target mapping.
#[derive(Debug, Clone)]
pub struct AxisGeometry {
    /// Total steps per shaft revolution (steps × microsteps).
    pub steps_per_revolution: u32,

    /// Logical positioning kind.
    pub kind: AxisKind,

    /// Travel limits in steps (if configured).
    pub limits: Option<StepLimits>,
}

impl AxisGeometry {
    /// Compute geometry from axis configuration.
    ///
    /// Assumes the configuration has passed [`validate_config`]; an axis
    /// with neither `station_count` nor `lead_mm_per_rev` maps to a
    /// rotary axis with a single station.
    ///
    /// [`validate_config`]: crate::config::validate_config
    pub fn from_config(config: &AxisConfig) -> Self {
        let steps_per_revolution = config.total_steps_per_revolution();

        let kind = if let Some(lead) = config.lead_mm_per_rev {
            AxisKind::Linear {
                steps_per_mm: steps_per_revolution as f32 / lead,
            }
        } else {
            let station_count = config.station_count.unwrap_or(1);
            AxisKind::Rotary {
                station_count,
                steps_per_station: steps_per_revolution as i64 / station_count as i64,
            }
        };

        let limits = match &kind {
            AxisKind::Linear { steps_per_mm } => config
                .travel
                .as_ref()
                .map(|t| StepLimits::from_travel_limits(t, *steps_per_mm)),
            AxisKind::Rotary { .. } => None,
        };

        Self {
            steps_per_revolution,
            kind,
            limits,
        }
    }

    /// Number of stations, if this is a rotary axis.
    #[inline]
    pub fn station_count(&self) -> Option<u16> {
        match self.kind {
            AxisKind::Rotary { station_count, .. } => Some(station_count),
            AxisKind::Linear { .. } => None,
        }
    }

    /// Steps between adjacent stations, if this is a rotary axis.
    #[inline]
    pub fn steps_per_station(&self) -> Option<i64> {
        match self.kind {
            AxisKind::Rotary {
                steps_per_station, ..
            } => Some(steps_per_station),
            AxisKind::Linear { .. } => None,
        }
    }

    /// Steps per millimeter, if this is a linear axis.
    #[inline]
    pub fn steps_per_mm(&self) -> Option<f32> {
        match self.kind {
            AxisKind::Linear { steps_per_mm } => Some(steps_per_mm),
            AxisKind::Rotary { .. } => None,
        }
    }

    /// Absolute step target for a logical station.
    pub fn station_target(&self, station: u16) -> Option<Steps> {
        self.steps_per_station()
            .map(|steps| Steps(station as i64 * steps))
    }

    /// Absolute step target for a press depth.
    pub fn depth_target(&self, depth: Millimeters) -> Option<Steps> {
        self.steps_per_mm()
            .map(|steps_per_mm| Steps((depth.0 * steps_per_mm) as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microsteps, StepsPerSec, StepsPerSecSquared};
    use crate::config::HomingConfig;

    fn rotary_config() -> AxisConfig {
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

    fn linear_config() -> AxisConfig {
        AxisConfig {
            name: heapless::String::try_from("plunger").unwrap(),
            steps_per_revolution: 200,
            microsteps: Microsteps::EIGHTH,
            max_speed: StepsPerSec(1000.0),
            acceleration: StepsPerSecSquared(500.0),
            invert_direction: false,
            homing: HomingConfig {
                speed: StepsPerSec(-400.0),
                backoff_steps: 400,
                min_contact_ms: 0,
                timeout_ms: 30_000,
                home_station: 0,
            },
            station_count: None,
            lead_mm_per_rev: Some(8.0),
            travel: None,
        }
    }

    #[test]
    fn test_rotary_geometry() {
        let geometry = AxisGeometry::from_config(&rotary_config());

        // 200 * 8 = 1600 steps/rev, 1600 / 10 = 160 steps/station
        assert_eq!(geometry.steps_per_revolution, 1600);
        assert_eq!(geometry.steps_per_station(), Some(160));
        assert_eq!(geometry.station_count(), Some(10));
        assert_eq!(geometry.station_target(9), Some(Steps(1440)));
        assert!(geometry.steps_per_mm().is_none());
        assert!(geometry.depth_target(Millimeters(1.0)).is_none());
    }

    #[test]
    fn test_linear_geometry() {
        let geometry = AxisGeometry::from_config(&linear_config());

        // 1600 steps/rev over 8 mm pitch = 200 steps/mm
        assert_eq!(geometry.steps_per_mm(), Some(200.0));
        assert_eq!(geometry.depth_target(Millimeters(50.0)), Some(Steps(10_000)));
        assert!(geometry.station_target(1).is_none());
    }
}
