//! Machine configuration - root configuration structure.

use serde::Deserialize;

use crate::axis::Axis;

use super::arc::ArcConfig;
use super::axis::AxisConfig;
use super::homing::HomingConfig;

/// Per-axis configuration tables (`[axes.x]`, `[axes.y]`, `[axes.z]`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AxesConfig {
    /// X axis configuration.
    #[serde(default)]
    pub x: Option<AxisConfig>,
    /// Y axis configuration.
    #[serde(default)]
    pub y: Option<AxisConfig>,
    /// Z axis configuration.
    #[serde(default)]
    pub z: Option<AxisConfig>,
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachineConfig {
    /// Axis configurations.
    #[serde(default)]
    pub axes: AxesConfig,

    /// Arc interpolation parameters.
    #[serde(default)]
    pub arc: ArcConfig,

    /// Homing sequence parameters.
    #[serde(default)]
    pub homing: HomingConfig,
}

impl MachineConfig {
    /// Get an axis configuration.
    pub fn axis(&self, axis: Axis) -> Option<&AxisConfig> {
        match axis {
            Axis::X => self.axes.x.as_ref(),
            Axis::Y => self.axes.y.as_ref(),
            Axis::Z => self.axes.z.as_ref(),
        }
    }

    /// List the configured axes in index order.
    pub fn configured_axes(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(move |&axis| self.axis(axis).is_some())
    }
}
