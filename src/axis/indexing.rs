//! Station indexing for the rotary axis.
//!
//! Maps "advance to next station" onto an absolute step target, gated on
//! generator idleness. Requests that cannot be honored are dropped and
//! reported, never queued.

use core::fmt;

use crate::config::units::Steps;
use crate::motion::StepGenerator;

/// Outcome of an advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Advance {
    /// Move issued toward the given station.
    Issued {
        /// Station now being moved to.
        station: u16,
        /// Absolute step target for that station.
        target: Steps,
    },
    /// Generator still mid-move; request dropped.
    Busy,
    /// Already at the last station; no wraparound.
    SequenceComplete,
    /// Axis has no trusted zero yet; request dropped.
    NotHomed,
}

impl fmt::Display for Advance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advance::Issued { station, .. } => write!(f, "Moving to station {}", station),
            Advance::Busy => write!(f, "Axis busy; request dropped"),
            Advance::SequenceComplete => {
                write!(f, "Sequence complete: all stations visited")
            }
            Advance::NotHomed => write!(f, "Axis not homed; request dropped"),
        }
    }
}

/// Logical station position of the rotary disk.
///
/// The index is monotonically non-decreasing within one cycle: it
/// saturates at the last station and rejects further advances. The only
/// reset is the one homing performs.
#[derive(Debug, Clone)]
pub struct StationIndexer {
    current: u16,
    count: u16,
    steps_per_station: i64,
}

impl StationIndexer {
    /// Create an indexer for `count` stations spaced `steps_per_station`
    /// apart.
    pub fn new(count: u16, steps_per_station: i64) -> Self {
        Self {
            current: 0,
            count,
            steps_per_station,
        }
    }

    /// Station the disk currently presents (or is moving toward).
    #[inline]
    pub fn current(&self) -> u16 {
        self.current
    }

    /// Total number of stations.
    #[inline]
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Re-reference the index after homing.
    pub fn reset(&mut self, station: u16) {
        self.current = station;
    }

    /// Request a move to the next station.
    ///
    /// Accepted only when the generator is idle; a mid-move request is
    /// dropped without changing the index or the target.
    pub fn advance(&mut self, generator: &mut StepGenerator) -> Advance {
        if !generator.is_idle() {
            return Advance::Busy;
        }

        if self.current >= self.count.saturating_sub(1) {
            return Advance::SequenceComplete;
        }

        self.current += 1;
        let target = Steps(self.current as i64 * self.steps_per_station);
        generator.move_to(target);

        Advance::Issued {
            station: self.current,
            target,
        }
    }
}
