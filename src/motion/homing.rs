//! Limit-switch homing.
//!
//! Each axis seeks toward its limit switch in small pulse chunks, sampling the
//! switch between chunks. The sequence stops as soon as the switch reads pressed
//! and gives up once the step budget derived from the maximum travel is spent.

use crate::axis::{Axis, AxisDriver};
use crate::config::HomingConstraints;
use crate::error::{HomingError, Result};

/// State of a homing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingState {
    /// Moving toward the limit switch.
    Seeking {
        /// Pulses issued so far.
        steps_issued: u32,
    },
    /// Limit switch reached. Terminal.
    Stopped {
        /// Pulses issued to reach the switch.
        steps_issued: u32,
    },
}

impl HomingState {
    /// Pulses issued so far.
    #[inline]
    pub fn steps_issued(&self) -> u32 {
        match *self {
            HomingState::Seeking { steps_issued } | HomingState::Stopped { steps_issued } => steps_issued,
        }
    }

    /// True once the limit switch has been reached.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self, HomingState::Stopped { .. })
    }
}

/// Homing state machine for one axis.
#[derive(Debug, Clone)]
pub struct HomingSequencer {
    axis: Axis,
    constraints: HomingConstraints,
    state: HomingState,
}

impl HomingSequencer {
    /// Create a sequencer in the `Seeking` state.
    pub fn new(axis: Axis, constraints: HomingConstraints) -> Self {
        Self {
            axis,
            constraints,
            state: HomingState::Seeking { steps_issued: 0 },
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> HomingState {
        self.state
    }

    /// Axis being homed.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Advance the sequence by one sample-and-seek cycle.
    ///
    /// Samples the limit switch; if pressed, the sequence stops without issuing
    /// another pulse. Otherwise one chunk of `seek_steps` pulses is issued.
    ///
    /// # Errors
    ///
    /// Returns `HomingError::Timeout` when the switch is still open after the
    /// whole step budget has been issued, and propagates driver errors.
    pub fn poll<D: AxisDriver + ?Sized>(&mut self, driver: &mut D) -> Result<HomingState> {
        let steps_issued = match self.state {
            HomingState::Stopped { .. } => return Ok(self.state),
            HomingState::Seeking { steps_issued } => steps_issued,
        };

        if driver.is_limit_pressed()? {
            self.state = HomingState::Stopped { steps_issued };
            return Ok(self.state);
        }

        let remaining = self.constraints.max_steps.saturating_sub(steps_issued);
        if remaining == 0 {
            warn!("homing {}: limit not reached after {} steps", self.axis, steps_issued);
            return Err(HomingError::Timeout {
                axis: self.axis,
                steps: steps_issued,
            }
            .into());
        }

        let chunk = self.constraints.seek_steps.max(1).min(remaining);
        trace!("homing {}: seeking {} steps", self.axis, chunk);
        driver.step(chunk, self.constraints.direction)?;

        self.state = HomingState::Seeking {
            steps_issued: steps_issued + chunk,
        };
        Ok(self.state)
    }

    /// Run the sequence until the switch is reached.
    ///
    /// Returns the number of pulses issued.
    pub fn run<D: AxisDriver + ?Sized>(&mut self, driver: &mut D) -> Result<u32> {
        loop {
            if let HomingState::Stopped { steps_issued } = self.poll(driver)? {
                return Ok(steps_issued);
            }
        }
    }
}
