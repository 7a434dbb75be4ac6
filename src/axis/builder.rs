//! Builder pattern for StepperAxis.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::{Microsteps, Millimeters};
use crate::config::{AxisConfig, AxisHomingConfig, MachineConfig, MechanicalConstraints, SoftLimits};
use crate::error::{ConfigError, Error, Result};

use super::id::Axis;
use super::stepper::StepperAxis;

/// Builder for creating StepperAxis instances.
pub struct StepperAxisBuilder<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    limit_pin: Option<LIMIT>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    steps_per_revolution: Option<u16>,
    microsteps: Microsteps,
    drive_radius: Option<Millimeters>,
    limits: Option<SoftLimits>,
    pulse_width_us: Option<u32>,
    step_interval_us: Option<u32>,
    homing: Option<AxisHomingConfig>,
    invert_direction: bool,
    limit_active_high: bool,
    enable_active_low: bool,
    config: Option<AxisConfig>,
}

impl<STEP, DIR, EN, LIMIT, DELAY> Default for StepperAxisBuilder<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, LIMIT, DELAY> StepperAxisBuilder<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            limit_pin: None,
            delay: None,
            name: None,
            steps_per_revolution: None,
            microsteps: Microsteps::FULL,
            drive_radius: None,
            limits: None,
            pulse_width_us: None,
            step_interval_us: None,
            homing: None,
            invert_direction: false,
            limit_active_high: false,
            enable_active_low: true,
            config: None,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the limit switch input.
    pub fn limit_pin(mut self, pin: LIMIT) -> Self {
        self.limit_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set steps per revolution (base motor steps before microstepping).
    pub fn steps_per_revolution(mut self, steps: u16) -> Self {
        self.steps_per_revolution = Some(steps);
        self
    }

    /// Set microstep configuration.
    pub fn microsteps(mut self, microsteps: Microsteps) -> Self {
        self.microsteps = microsteps;
        self
    }

    /// Set the pulley/pinion radius converting rotation into travel.
    pub fn drive_radius(mut self, radius: Millimeters) -> Self {
        self.drive_radius = Some(radius);
        self
    }

    /// Set soft limits.
    pub fn limits(mut self, limits: SoftLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Set the STEP high time in microseconds.
    pub fn pulse_width_us(mut self, us: u32) -> Self {
        self.pulse_width_us = Some(us);
        self
    }

    /// Set the period between STEP rising edges in microseconds.
    pub fn step_interval_us(mut self, us: u32) -> Self {
        self.step_interval_us = Some(us);
        self
    }

    /// Set the homing direction, seek chunk and travel budget.
    pub fn homing(mut self, homing: AxisHomingConfig) -> Self {
        self.homing = Some(homing);
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the limit switch active level.
    pub fn limit_active_high(mut self, active_high: bool) -> Self {
        self.limit_active_high = active_high;
        self
    }

    /// Set the ENABLE pin active level.
    pub fn enable_active_low(mut self, active_low: bool) -> Self {
        self.enable_active_low = active_low;
        self
    }

    /// Configure from an AxisConfig.
    ///
    /// The configuration takes precedence over individually set calibration,
    /// timing and homing fields. Fields left unset on a setter-built axis take the
    /// `AxisConfig` defaults.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        if !config.name.is_empty() {
            self.name = Some(config.name.clone());
        }
        self.invert_direction = config.invert_direction;
        self.limit_active_high = config.limit_active_high;
        self.enable_active_low = config.enable_active_low;
        self.config = Some(config.clone());
        self
    }

    /// Configure from MachineConfig by axis.
    pub fn from_config(self, config: &MachineConfig, axis: Axis) -> Result<Self> {
        let axis_config = config
            .axis(axis)
            .ok_or(Error::Config(ConfigError::AxisNotConfigured(axis)))?;

        Ok(self.name(axis.letter()).from_axis_config(axis_config))
    }

    /// Build the StepperAxis.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the calibration is invalid.
    pub fn build(self) -> Result<StepperAxis<STEP, DIR, EN, LIMIT, DELAY>> {
        let step_pin = self.step_pin.ok_or(ConfigError::MissingField("step_pin"))?;
        let dir_pin = self.dir_pin.ok_or(ConfigError::MissingField("dir_pin"))?;
        let enable_pin = self.enable_pin.ok_or(ConfigError::MissingField("enable_pin"))?;
        let limit_pin = self.limit_pin.ok_or(ConfigError::MissingField("limit_pin"))?;
        let delay = self.delay.ok_or(ConfigError::MissingField("delay"))?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("axis").unwrap_or_default());

        let config = match self.config {
            Some(config) => config,
            None => {
                // Build an axis config from individual fields
                let steps = self
                    .steps_per_revolution
                    .ok_or(ConfigError::MissingField("steps_per_revolution"))?;
                let radius = self
                    .drive_radius
                    .ok_or(ConfigError::MissingField("drive_radius"))?;

                let mut config = AxisConfig::new(0, 0, 0, 0, steps, radius);
                config.microsteps = self.microsteps;
                config.limits = self.limits;
                if let Some(us) = self.pulse_width_us {
                    config.pulse_width_us = us;
                }
                if let Some(us) = self.step_interval_us {
                    config.step_interval_us = us;
                }
                if let Some(homing) = self.homing {
                    config.homing = homing;
                }
                config
            }
        };

        crate::config::validate_axis(&config)?;
        let constraints = MechanicalConstraints::from_config(&config);

        Ok(StepperAxis::new(
            step_pin,
            dir_pin,
            enable_pin,
            limit_pin,
            delay,
            constraints,
            name,
            self.invert_direction,
            self.limit_active_high,
            self.enable_active_low,
        ))
    }
}
