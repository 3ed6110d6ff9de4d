//! Error types for carousel-motion.
//!
//! Provides unified error handling across configuration, axis control, and
//! homing. Dropped commands (axis busy, sequence exhausted) are reported as
//! outcomes, not errors; only structural misuse and hardware faults land here.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all carousel-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis operation error
    Axis(AxisError),
    /// Homing sequence error
    Homing(HomingError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Invalid max speed (must be > 0)
    InvalidMaxSpeed(f32),
    /// Invalid acceleration (must be > 0)
    InvalidAcceleration(f32),
    /// Invalid homing speed (must be non-zero and within max speed)
    InvalidHomingSpeed(f32),
    /// Invalid back-off distance (must be > 0)
    InvalidBackoff(i64),
    /// Station count does not divide steps per revolution evenly
    InvalidStationCount {
        /// Configured station count
        stations: u16,
        /// Total steps per revolution
        steps_per_revolution: u32,
    },
    /// Home station is outside the station range
    InvalidHomeStation {
        /// Configured home station
        station: u16,
        /// Configured station count
        stations: u16,
    },
    /// Axis declares neither stations nor a lead screw
    MissingAxisKind(heapless::String<32>),
    /// Axis declares both stations and a lead screw
    AmbiguousAxisKind(heapless::String<32>),
    /// Invalid lead screw pitch (must be > 0)
    InvalidLeadScrew(f32),
    /// Invalid travel limits (min must be < max)
    InvalidTravelLimits {
        /// Minimum limit value
        min: f32,
        /// Maximum limit value
        max: f32,
    },
    /// Travel limits configured on a rotary axis
    TravelLimitsUnsupported(heapless::String<32>),
    /// Sampler routing references an axis of the wrong kind
    WrongAxisKind {
        /// Referenced axis name
        axis: heapless::String<32>,
        /// Expected kind ("rotary" or "linear")
        expected: &'static str,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisError {
    /// Pin operation failed
    PinError,
    /// Position is not trustworthy yet (axis has not been homed)
    NotHomed,
    /// Axis has no station indexing (not a rotary axis)
    NotIndexed,
    /// Axis has no linear calibration (not a lead screw axis)
    NotLinear,
    /// Target exceeds travel limits
    LimitExceeded {
        /// Requested position in steps
        position: i64,
        /// Limit that was exceeded (min or max)
        limit: i64,
    },
}

/// Homing sequence errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HomingError {
    /// Switch never triggered within the configured deadline
    Timeout {
        /// Seek time elapsed before giving up, in milliseconds
        elapsed_ms: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidHomingSpeed(v) => {
                write!(f, "Invalid homing speed: {}. Must be non-zero and within max speed", v)
            }
            ConfigError::InvalidBackoff(v) => {
                write!(f, "Invalid back-off distance: {}. Must be > 0", v)
            }
            ConfigError::InvalidStationCount {
                stations,
                steps_per_revolution,
            } => {
                write!(
                    f,
                    "Station count {} does not divide {} steps/rev evenly",
                    stations, steps_per_revolution
                )
            }
            ConfigError::InvalidHomeStation { station, stations } => {
                write!(f, "Home station {} out of range (0..{})", station, stations)
            }
            ConfigError::MissingAxisKind(name) => {
                write!(f, "Axis '{}' needs station_count or lead_mm_per_rev", name)
            }
            ConfigError::AmbiguousAxisKind(name) => {
                write!(f, "Axis '{}' cannot have both station_count and lead_mm_per_rev", name)
            }
            ConfigError::InvalidLeadScrew(v) => {
                write!(f, "Invalid lead screw pitch: {}. Must be > 0", v)
            }
            ConfigError::InvalidTravelLimits { min, max } => {
                write!(f, "Invalid travel limits: min ({}) must be < max ({})", min, max)
            }
            ConfigError::TravelLimitsUnsupported(name) => {
                write!(f, "Axis '{}' is rotary and cannot have travel limits", name)
            }
            ConfigError::WrongAxisKind { axis, expected } => {
                write!(f, "Axis '{}' is not a {} axis", axis, expected)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::PinError => write!(f, "GPIO pin operation failed"),
            AxisError::NotHomed => write!(f, "Axis has not been homed"),
            AxisError::NotIndexed => write!(f, "Axis has no station indexing"),
            AxisError::NotLinear => write!(f, "Axis has no linear calibration"),
            AxisError::LimitExceeded { position, limit } => {
                write!(f, "Position {} exceeds limit {}", position, limit)
            }
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::Timeout { elapsed_ms } => {
                write!(f, "Limit switch not reached after {} ms", elapsed_ms)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}
