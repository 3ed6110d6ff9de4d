//! Configuration module for carousel-motion.
//!
//! Provides types for loading and validating axis and sampler
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod geometry;
mod limits;
#[cfg(feature = "std")]
mod loader;
mod system;
pub mod units;
mod validation;

pub use axis::{AxisConfig, HomingConfig};
pub use geometry::{AxisGeometry, AxisKind};
pub use limits::{LimitPolicy, StepLimits, TravelLimits};
pub use system::{SamplerConfig, SystemConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microsteps, Millimeters, Steps, StepsPerSec, StepsPerSecSquared};
