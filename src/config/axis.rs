//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::TravelLimits;
use super::units::{Microsteps, StepsPerSec, StepsPerSecSquared};

/// Complete axis configuration from TOML.
///
/// One instance per physical axis. The carousel disk and the plunger
/// lead screw share this shape and differ only in values: a rotary axis
/// sets `station_count`, a linear axis sets `lead_mm_per_rev`.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Base steps per revolution (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Microstep setting (1, 2, 4, 8, 16, 32, etc.).
    pub microsteps: Microsteps,

    /// Maximum speed in steps per second.
    #[serde(rename = "max_speed_steps_per_sec")]
    pub max_speed: StepsPerSec,

    /// Acceleration in steps per second squared.
    #[serde(rename = "acceleration_steps_per_sec2")]
    pub acceleration: StepsPerSecSquared,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Homing parameters.
    pub homing: HomingConfig,

    /// Number of indexed stations per revolution (rotary axes only).
    #[serde(default)]
    pub station_count: Option<u16>,

    /// Lead screw travel per revolution in millimeters (linear axes only).
    #[serde(default)]
    pub lead_mm_per_rev: Option<f32>,

    /// Optional travel limits (linear axes only).
    #[serde(default)]
    pub travel: Option<TravelLimits>,
}

impl AxisConfig {
    /// Calculate total steps per shaft revolution.
    pub fn total_steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution as u32 * self.microsteps.value() as u32
    }

    /// Whether this axis is a rotary (station-indexed) axis.
    pub fn is_rotary(&self) -> bool {
        self.station_count.is_some()
    }

    /// Whether this axis is a linear (lead screw) axis.
    pub fn is_linear(&self) -> bool {
        self.lead_mm_per_rev.is_some()
    }
}

/// Homing parameters for one axis.
///
/// Debounce and timeout have no counterpart in the field units this
/// controller replaces; both default to the observed behavior there
/// (single live switch read, no deadline) except that a stuck switch is
/// reported as an error after `timeout_ms` rather than hanging the loop.
#[derive(Debug, Clone, Deserialize)]
pub struct HomingConfig {
    /// Constant homing speed in steps per second, signed toward the switch.
    #[serde(rename = "speed_steps_per_sec")]
    pub speed: StepsPerSec,

    /// Back-off distance in steps after switch contact, away from the
    /// switch, parking the axis at a safe mechanical clearance.
    pub backoff_steps: i64,

    /// Minimum continuous switch contact before it counts as triggered.
    /// Zero means a single live read is trusted.
    #[serde(default)]
    pub min_contact_ms: u32,

    /// Maximum seek duration before homing fails. Zero disables the
    /// deadline and restores the hang-forever behavior.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,

    /// Logical station the axis is considered to occupy after homing
    /// (rotary axes only).
    #[serde(default)]
    pub home_station: u16,
}

fn default_timeout_ms() -> u32 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_steps() {
        let config = AxisConfig {
            name: String::try_from("carousel").unwrap(),
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
        };

        // 200 * 8 = 1600
        assert_eq!(config.total_steps_per_revolution(), 1600);
        assert!(config.is_rotary());
        assert!(!config.is_linear());
    }
}
