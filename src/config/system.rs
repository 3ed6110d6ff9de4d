//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;
use super::units::Millimeters;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named axis configurations.
    pub axes: FnvIndexMap<String<32>, AxisConfig, 4>,

    /// Sampler command routing (which axis is which, press depth).
    #[serde(default)]
    pub sampler: Option<SamplerConfig>,
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            axes: FnvIndexMap::new(),
            sampler: None,
        }
    }
}

/// Sampler-level wiring: names the two axes and the press depth.
///
/// The press depth is an operating parameter of the sampling cycle, not
/// of the plunger axis itself, so it lives here.
#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    /// Name of the rotary carousel axis.
    pub carousel: String<32>,

    /// Name of the linear plunger axis.
    pub plunger: String<32>,

    /// Fixed press depth commanded by the press command.
    #[serde(rename = "press_depth_mm")]
    pub press_depth: Millimeters,
}
