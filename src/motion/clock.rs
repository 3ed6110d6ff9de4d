//! Time source for step scheduling.

use core::time::Duration;

/// Something which records the elapsed real time.
///
/// Shared references so one clock can serve both axes of the control loop.
/// Must be monotonically non-decreasing; step timing arithmetic assumes it.
pub trait Clock {
    /// The amount of time that has passed since a clock-specific reference
    /// point (e.g. controller startup).
    fn elapsed(&self) -> Duration;
}

impl<C: Clock> Clock for &C {
    fn elapsed(&self) -> Duration {
        (*self).elapsed()
    }
}

/// A monotonically non-decreasing clock backed by the operating system.
///
/// Requires the `std` feature.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub struct OsClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl OsClock {
    /// Create a clock referenced to now.
    pub fn new() -> OsClock {
        OsClock::default()
    }
}

#[cfg(feature = "std")]
impl Clock for OsClock {
    fn elapsed(&self) -> Duration {
        self.created_at.elapsed()
    }
}

#[cfg(feature = "std")]
impl Default for OsClock {
    fn default() -> OsClock {
        OsClock {
            created_at: std::time::Instant::now(),
        }
    }
}
