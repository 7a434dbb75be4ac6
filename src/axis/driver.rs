//! Axis driver trait.
//!
//! The motion core talks to hardware only through this trait, so a simulated
//! axis can stand in for real pins in host-side tests.

use crate::config::MechanicalConstraints;
use crate::error::Result;

use super::id::Direction;

/// One stepper-driven axis: pulse output, limit switch input and calibration.
///
/// Implementations own pin assignment, steps-per-mm calibration and pulse timing.
/// There is no position feedback: a stalled motor is indistinguishable from a
/// moving one at this level.
pub trait AxisDriver {
    /// Calibration and limits of this axis.
    fn constraints(&self) -> &MechanicalConstraints;

    /// Issue `pulses` step pulses in `direction`, blocking until the last one is out.
    ///
    /// Zero pulses must be a no-op.
    fn step(&mut self, pulses: u32, direction: Direction) -> Result<()>;

    /// Sample the limit switch.
    fn is_limit_pressed(&mut self) -> Result<bool>;

    /// Energize or release the motor driver.
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;
}

impl<D: AxisDriver + ?Sized> AxisDriver for &mut D {
    #[inline]
    fn constraints(&self) -> &MechanicalConstraints {
        (**self).constraints()
    }

    #[inline]
    fn step(&mut self, pulses: u32, direction: Direction) -> Result<()> {
        (**self).step(pulses, direction)
    }

    #[inline]
    fn is_limit_pressed(&mut self) -> Result<bool> {
        (**self).is_limit_pressed()
    }

    #[inline]
    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        (**self).set_enabled(enabled)
    }
}
