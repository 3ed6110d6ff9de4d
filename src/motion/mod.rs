//! Motion module for carousel-motion.
//!
//! Provides the trapezoidal step generator, position tracking, and the
//! clock/device seams it is driven through.

mod clock;
mod device;
mod position;
mod stepper;

pub use clock::Clock;
#[cfg(feature = "std")]
pub use clock::OsClock;
pub use device::{func_device, StepContext, StepDevice};
pub use position::Position;
pub use stepper::StepGenerator;
