//! # carousel-motion
//!
//! Two-axis stepper motion control for an automated syringe-sampling
//! carousel: a rotary indexing disk and a linear plunger on a lead screw.
//!
//! ## Features
//!
//! - **One parameterized axis core**: both axes are [`Axis`] instances
//!   differing only in configuration
//! - **Trapezoidal step generation**: non-blocking, at most one step
//!   decision per control-loop tick
//! - **Switch-referenced homing**: explicit state machine with
//!   configurable contact debounce and seek timeout
//! - **Station indexing**: idle-gated absolute moves, saturating at the
//!   last station
//! - **Configuration-driven**: axes and sampler routing in TOML files
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/ENA, `InputPin` for
//!   the limit switch, `DelayNs` for pulse timing
//! - **no_std compatible**: core library works without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use carousel_motion::{Axis, Command, OsClock, Clock};
//! use carousel_motion::hal::StepDirPins;
//!
//! let config = carousel_motion::load_config("sampler.toml")?;
//!
//! let mut carousel = Axis::builder()
//!     .device(StepDirPins::new(step_pin, dir_pin, delay))
//!     .switch(limit_pin)
//!     .from_config(&config, "carousel")?
//!     .build()?;
//!
//! let clock = OsClock::new();
//! carousel.begin_homing(clock.elapsed());
//! loop {
//!     let now = clock.elapsed();
//!     carousel.tick(now)?;
//!     if let Some(byte) = serial.read_byte() {
//!         if Command::parse(byte) == Some(Command::NextStation) {
//!             println!("{}", carousel.advance()?);
//!         }
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing, and `OsClock`
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt formatting for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod axis;
pub mod command;
pub mod config;
pub mod error;
pub mod hal;
pub mod motion;

// Re-exports for ergonomic API
pub use axis::{Advance, Axis, AxisBuilder, HomingEvent, HomingStatus, LimitSwitch};
pub use command::Command;
pub use config::{validate_config, AxisConfig, HomingConfig, SamplerConfig, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Clock, StepDevice, StepGenerator};

#[cfg(feature = "std")]
pub use motion::OsClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Microsteps, Millimeters, Steps, StepsPerSec, StepsPerSecSquared};
