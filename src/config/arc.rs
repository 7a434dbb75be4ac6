//! Arc interpolation configuration.

use serde::Deserialize;

use super::units::{Degrees, Millimeters};

/// Parameters of the arc interpolation engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArcConfig {
    /// Angular size of one interpolation segment.
    ///
    /// Smaller angles follow the circle more closely at the cost of more
    /// segments per arc.
    #[serde(default = "default_step_angle", rename = "step_angle_deg")]
    pub step_angle: Degrees,

    /// Largest accepted difference between the start radius and the end radius.
    #[serde(default = "default_radius_tolerance", rename = "radius_tolerance_mm")]
    pub radius_tolerance: Millimeters,
}

fn default_step_angle() -> Degrees {
    Degrees(1.0)
}

fn default_radius_tolerance() -> Millimeters {
    Millimeters(0.05)
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            step_angle: default_step_angle(),
            radius_tolerance: default_radius_tolerance(),
        }
    }
}

impl ArcConfig {
    /// Step angle in radians.
    #[inline]
    pub fn step_angle_rad(&self) -> f32 {
        self.step_angle.to_radians()
    }
}
