//! Axis homing status.

/// Whether an axis position can be trusted.
///
/// Position is meaningful for indexing only in `Homed`. The status is
/// re-established every power cycle; there is no persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingStatus {
    /// No reference established since power-up.
    #[default]
    Unhomed,
    /// Homing sequence in progress; the sequencer owns the generator.
    Homing,
    /// Logical zero established; indexed moves are allowed.
    Homed,
}

impl HomingStatus {
    /// Get the status name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HomingStatus::Unhomed => "Unhomed",
            HomingStatus::Homing => "Homing",
            HomingStatus::Homed => "Homed",
        }
    }
}

impl core::fmt::Display for HomingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
