//! Mechanical constraints derived from axis configuration.

use crate::axis::Direction;

use super::axis::AxisConfig;
use super::limits::SoftLimits;
use super::units::{Millimeters, Steps};

/// Homing parameters converted to steps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomingConstraints {
    /// Direction of travel toward the limit switch.
    pub direction: Direction,
    /// Pulses issued between two limit-switch samples.
    pub seek_steps: u32,
    /// Step budget before homing fails.
    pub max_steps: u32,
}

/// Derived mechanical parameters computed from axis configuration.
///
/// These are computed once at initialization and used for every move.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MechanicalConstraints {
    /// Total steps per motor revolution (steps × microsteps).
    pub steps_per_revolution: u32,

    /// Axis travel per motor revolution.
    pub travel_per_revolution: Millimeters,

    /// Steps per millimeter of travel.
    pub steps_per_mm: f32,

    /// STEP high time in nanoseconds.
    pub pulse_width_ns: u32,

    /// Period between consecutive STEP rising edges in nanoseconds.
    pub step_interval_ns: u32,

    /// Soft limits (if configured).
    pub limits: Option<SoftLimits>,

    /// Homing parameters in steps.
    pub homing: HomingConstraints,
}

impl MechanicalConstraints {
    /// Compute mechanical constraints from axis configuration.
    pub fn from_config(config: &AxisConfig) -> Self {
        let steps_per_revolution = config.total_steps_per_revolution();
        let travel_per_revolution = config.travel_per_revolution();
        let steps_per_mm = config.steps_per_mm();

        let max_steps = libm::ceilf(config.homing.max_travel.0 * steps_per_mm);
        let max_steps = if max_steps >= u32::MAX as f32 {
            u32::MAX
        } else {
            max_steps as u32
        };

        Self {
            steps_per_revolution,
            travel_per_revolution,
            steps_per_mm,
            pulse_width_ns: config.pulse_width_us.saturating_mul(1_000),
            step_interval_ns: config.step_interval_us.saturating_mul(1_000),
            limits: config.limits,
            homing: HomingConstraints {
                direction: config.homing.direction,
                seek_steps: config.homing.seek_steps,
                max_steps,
            },
        }
    }

    /// Nearest step to a millimeter coordinate.
    #[inline]
    pub fn mm_to_steps(&self, mm: Millimeters) -> Steps {
        Steps::from_mm(mm, self.steps_per_mm)
    }

    /// Nearest step to a millimeter coordinate, `None` outside the `i64` range.
    #[inline]
    pub fn checked_mm_to_steps(&self, mm: Millimeters) -> Option<Steps> {
        Steps::checked_from_mm(mm, self.steps_per_mm)
    }

    /// Convert steps to millimeters.
    #[inline]
    pub fn steps_to_mm(&self, steps: Steps) -> Millimeters {
        steps.to_mm(self.steps_per_mm)
    }

    /// Check a target against the soft limits.
    ///
    /// Returns the (possibly clamped) target, or `None` if the policy rejects it.
    pub fn check_limits(&self, target: Millimeters) -> Option<Millimeters> {
        match &self.limits {
            Some(limits) => limits.apply(target),
            None => Some(target),
        }
    }
}
