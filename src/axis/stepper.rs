//! STEP/DIR stepper axis.
//!
//! Generic over embedded-hal 1.0 pin types.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::Steps;
use crate::config::MechanicalConstraints;
use crate::error::{AxisError, Result};

use super::driver::AxisDriver;
use super::id::Direction;

/// Stepper axis driven through STEP, DIR and ENABLE outputs with a limit switch input.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: ENABLE pin type (must implement `OutputPin`)
/// - `LIMIT`: limit switch pin type (must implement `InputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
pub struct StepperAxis<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = positive, or inverted).
    dir_pin: DIR,

    /// Driver enable pin.
    enable_pin: EN,

    /// Limit switch input.
    limit_pin: LIMIT,

    /// Delay provider for step timing.
    delay: DELAY,

    /// Mechanical constraints from configuration.
    constraints: MechanicalConstraints,

    /// Axis name for logging/debugging.
    name: heapless::String<32>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Limit switch reads high when pressed.
    limit_active_high: bool,

    /// Driver is enabled by a low ENABLE level.
    enable_active_low: bool,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether the driver is currently energized.
    enabled: bool,

    /// Net pulses issued since construction.
    issued: Steps,
}

impl<STEP, DIR, EN, LIMIT, DELAY> StepperAxis<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        enable_pin: EN,
        limit_pin: LIMIT,
        delay: DELAY,
        constraints: MechanicalConstraints,
        name: heapless::String<32>,
        invert_direction: bool,
        limit_active_high: bool,
        enable_active_low: bool,
    ) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            limit_pin,
            delay,
            constraints,
            name,
            invert_direction,
            limit_active_high,
            enable_active_low,
            current_direction: None,
            enabled: false,
            issued: Steps::default(),
        }
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Net pulses issued since construction (positive minus negative).
    #[inline]
    pub fn issued_steps(&self) -> Steps {
        self.issued
    }

    /// Whether the driver is currently energized.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Release the pins and delay provider.
    pub fn release(self) -> (STEP, DIR, EN, LIMIT, DELAY) {
        (self.step_pin, self.dir_pin, self.enable_pin, self.limit_pin, self.delay)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Positive => !self.invert_direction,
            Direction::Negative => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| AxisError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| AxisError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    fn pulse(&mut self) -> Result<()> {
        let width = self.constraints.pulse_width_ns;

        self.step_pin.set_high().map_err(|_| AxisError::PinError)?;
        self.delay.delay_ns(width);
        self.step_pin.set_low().map_err(|_| AxisError::PinError)?;

        let rest = self.constraints.step_interval_ns.saturating_sub(width);
        if rest > 0 {
            self.delay.delay_ns(rest);
        }

        Ok(())
    }
}

impl<STEP, DIR, EN, LIMIT, DELAY> AxisDriver for StepperAxis<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    #[inline]
    fn constraints(&self) -> &MechanicalConstraints {
        &self.constraints
    }

    fn step(&mut self, pulses: u32, direction: Direction) -> Result<()> {
        if pulses == 0 {
            return Ok(());
        }

        if !self.enabled {
            self.set_enabled(true)?;
        }
        self.set_direction(direction)?;

        for _ in 0..pulses {
            self.pulse()?;
            self.issued = Steps(self.issued.0 + direction.sign());
        }

        Ok(())
    }

    fn is_limit_pressed(&mut self) -> Result<bool> {
        let high = self.limit_pin.is_high().map_err(|_| AxisError::PinError)?;
        Ok(high == self.limit_active_high)
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        let pin_high = enabled != self.enable_active_low;

        if pin_high {
            self.enable_pin.set_high().map_err(|_| AxisError::PinError)?;
        } else {
            self.enable_pin.set_low().map_err(|_| AxisError::PinError)?;
        }

        self.enabled = enabled;
        Ok(())
    }
}
