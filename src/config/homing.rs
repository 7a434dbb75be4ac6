//! Homing configuration.

use heapless::Vec;
use serde::Deserialize;

use crate::axis::{Axis, Direction};

use super::units::Millimeters;

/// Per-axis homing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisHomingConfig {
    /// Direction of travel toward the limit switch.
    #[serde(default)]
    pub direction: Direction,

    /// Pulses issued between two limit-switch samples.
    #[serde(default = "default_seek_steps")]
    pub seek_steps: u32,

    /// Longest travel allowed before homing is declared failed.
    #[serde(default = "default_max_travel", rename = "max_travel_mm")]
    pub max_travel: Millimeters,
}

fn default_seek_steps() -> u32 {
    1
}

fn default_max_travel() -> Millimeters {
    Millimeters(500.0)
}

impl Default for AxisHomingConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Negative,
            seek_steps: default_seek_steps(),
            max_travel: default_max_travel(),
        }
    }
}

/// Machine-level homing parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HomingConfig {
    /// Order in which `home()` visits the axes.
    ///
    /// Z first lifts the tool clear of the workpiece before the plane axes move.
    #[serde(default = "default_order")]
    pub order: Vec<Axis, 3>,
}

fn default_order() -> Vec<Axis, 3> {
    Vec::from_slice(&[Axis::Z, Axis::X, Axis::Y]).unwrap_or_default()
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
        }
    }
}

impl HomingConfig {
    /// Complete homing sequence: the configured order, followed by any axis it
    /// leaves out in index order.
    pub fn sequence(&self) -> Vec<Axis, 3> {
        let mut sequence = Vec::new();
        for &axis in self.order.iter().chain(Axis::ALL.iter()) {
            if !sequence.contains(&axis) {
                // capacity equals the number of distinct axes
                let _ = sequence.push(axis);
            }
        }
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_lifts_z_first() {
        let config = HomingConfig::default();
        assert_eq!(config.order.as_slice(), &[Axis::Z, Axis::X, Axis::Y]);
    }

    #[test]
    fn test_partial_order_is_completed() {
        let config = HomingConfig {
            order: Vec::from_slice(&[Axis::Y]).unwrap(),
        };
        assert_eq!(config.sequence().as_slice(), &[Axis::Y, Axis::X, Axis::Z]);
    }

    #[test]
    fn test_axis_homing_defaults() {
        let config = AxisHomingConfig::default();
        assert_eq!(config.direction, Direction::Negative);
        assert_eq!(config.seek_steps, 1);
        assert_eq!(config.max_travel, Millimeters(500.0));
    }
}
