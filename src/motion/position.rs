//! Commanded position of the three axes.

use crate::axis::Axis;
use crate::config::units::Millimeters;

/// Commanded machine position in millimeters.
///
/// This is the single source of truth for where the tool is believed to be.
/// It accumulates commanded motion only; nothing measures the real position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionModel {
    coords: [f32; 3],
}

impl PositionModel {
    /// Position at the machine origin.
    #[inline]
    pub const fn new() -> Self {
        Self { coords: [0.0; 3] }
    }

    /// Position at specific coordinates.
    #[inline]
    pub const fn at(x: Millimeters, y: Millimeters, z: Millimeters) -> Self {
        Self {
            coords: [x.0, y.0, z.0],
        }
    }

    /// Get one coordinate.
    #[inline]
    pub fn get(&self, axis: Axis) -> Millimeters {
        Millimeters(self.coords[axis.index()])
    }

    /// Overwrite one coordinate.
    #[inline]
    pub fn set(&mut self, axis: Axis, value: Millimeters) {
        self.coords[axis.index()] = value.0;
    }

    /// Overwrite all coordinates.
    #[inline]
    pub fn set_all(&mut self, x: Millimeters, y: Millimeters, z: Millimeters) {
        self.coords = [x.0, y.0, z.0];
    }

    /// Reset one coordinate to the machine zero.
    #[inline]
    pub fn reset(&mut self, axis: Axis) {
        self.coords[axis.index()] = 0.0;
    }

    /// X coordinate.
    #[inline]
    pub fn x(&self) -> Millimeters {
        self.get(Axis::X)
    }

    /// Y coordinate.
    #[inline]
    pub fn y(&self) -> Millimeters {
        self.get(Axis::Y)
    }

    /// Z coordinate.
    #[inline]
    pub fn z(&self) -> Millimeters {
        self.get(Axis::Z)
    }
}
