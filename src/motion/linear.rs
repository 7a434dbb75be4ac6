//! Linear motion: millimeter targets to pulse trains.

use crate::axis::Direction;
use crate::config::units::{Millimeters, Steps};
use crate::config::MechanicalConstraints;
use crate::error::{MotionError, Result};

/// Pulse train for one axis moving between two commanded positions.
///
/// Pulses are derived from the nearest step of each absolute position rather than
/// from the delta alone, so rounding never accumulates across consecutive moves and
/// the pulses issued always match the commanded position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearMove {
    /// Commanded position before the move.
    pub from: Millimeters,
    /// Commanded position after the move.
    pub to: Millimeters,
    /// Number of pulses to issue.
    pub pulses: u32,
    /// Direction of the pulses.
    pub direction: Direction,
}

impl LinearMove {
    /// Plan a move from `from` to the absolute target `to`.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::NonFinite` for NaN or infinite coordinates and
    /// `MotionError::Overflow` when either position has no `i64` step count or the
    /// pulse count exceeds `u32`.
    pub fn to_target(
        from: Millimeters,
        to: Millimeters,
        constraints: &MechanicalConstraints,
    ) -> Result<Self> {
        if !from.is_finite() || !to.is_finite() {
            return Err(MotionError::NonFinite.into());
        }

        let to_steps = constraints.checked_mm_to_steps(to).ok_or(MotionError::Overflow)?;
        let from_steps = constraints.checked_mm_to_steps(from).ok_or(MotionError::Overflow)?;
        let delta = to_steps.checked_sub(from_steps).ok_or(MotionError::Overflow)?;
        let pulses = u32::try_from(delta.abs()).map_err(|_| MotionError::Overflow)?;

        Ok(Self {
            from,
            to,
            pulses,
            direction: Direction::from_steps(delta.value()),
        })
    }

    /// Plan a relative move of `distance` starting at `from`.
    pub fn by_distance(
        from: Millimeters,
        distance: Millimeters,
        constraints: &MechanicalConstraints,
    ) -> Result<Self> {
        if !distance.is_finite() {
            return Err(MotionError::NonFinite.into());
        }
        Self::to_target(from, from + distance, constraints)
    }

    /// True when no pulse needs to be issued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pulses == 0
    }

    /// Signed step count of the move.
    #[inline]
    pub fn signed_steps(&self) -> Steps {
        Steps(self.pulses as i64 * self.direction.sign())
    }
}
