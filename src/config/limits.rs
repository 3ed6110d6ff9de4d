//! Travel limit configuration and types.

use serde::Deserialize;

use super::units::Millimeters;

/// Policy for handling travel limit violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Reject moves that would exceed limits.
    #[default]
    Reject,
    /// Clamp target to nearest limit.
    Clamp,
}

/// Travel limits in millimeters (from configuration).
#[derive(Debug, Clone, Deserialize)]
pub struct TravelLimits {
    /// Minimum allowed position in millimeters.
    #[serde(rename = "min_mm")]
    pub min: Millimeters,

    /// Maximum allowed position in millimeters.
    #[serde(rename = "max_mm")]
    pub max: Millimeters,

    /// What to do when a limit is exceeded.
    #[serde(default)]
    pub policy: LimitPolicy,
}

impl TravelLimits {
    /// Create new travel limits.
    pub fn new(min: Millimeters, max: Millimeters, policy: LimitPolicy) -> Self {
        Self { min, max, policy }
    }

    /// Check if limits are valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min.0 < self.max.0
    }

    /// Check if a position is within limits.
    pub fn contains(&self, position: Millimeters) -> bool {
        position.0 >= self.min.0 && position.0 <= self.max.0
    }
}

/// Travel limits converted to steps (for runtime use).
#[derive(Debug, Clone)]
pub struct StepLimits {
    /// Minimum position in steps.
    pub min_steps: i64,
    /// Maximum position in steps.
    pub max_steps: i64,
    /// Limit policy.
    pub policy: LimitPolicy,
}

impl StepLimits {
    /// Create step limits from travel limits and steps per millimeter.
    pub fn from_travel_limits(travel: &TravelLimits, steps_per_mm: f32) -> Self {
        Self {
            min_steps: (travel.min.0 * steps_per_mm) as i64,
            max_steps: (travel.max.0 * steps_per_mm) as i64,
            policy: travel.policy,
        }
    }

    /// Check if a position is within limits.
    pub fn contains(&self, steps: i64) -> bool {
        steps >= self.min_steps && steps <= self.max_steps
    }

    /// Apply limit policy to a target position.
    ///
    /// Returns `Some(steps)` if valid or clamped, `None` if rejected.
    pub fn apply(&self, target: i64) -> Option<i64> {
        if self.contains(target) {
            Some(target)
        } else {
            match self.policy {
                LimitPolicy::Reject => None,
                LimitPolicy::Clamp => {
                    if target < self.min_steps {
                        Some(self.min_steps)
                    } else {
                        Some(self.max_steps)
                    }
                }
            }
        }
    }

    /// The limit that a rejected target violated (min or max).
    pub fn violated_by(&self, target: i64) -> i64 {
        if target < self.min_steps {
            self.min_steps
        } else {
            self.max_steps
        }
    }
}
