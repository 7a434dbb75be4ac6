//! Configuration validation.

use crate::axis::Axis;
use crate::error::{ConfigError, Error, Result};

use super::{ArcConfig, AxisConfig, HomingConfig, MachineConfig};

/// Largest accepted arc interpolation step.
const MAX_STEP_ANGLE_DEG: f32 = 90.0;

/// Validate a machine configuration.
///
/// Checks:
/// - Axis calibration is usable (steps, drive radius, pulse timing)
/// - Soft limits are valid (min < max)
/// - Homing bounds are positive
/// - Arc step angle and radius tolerance are in range
/// - No axis appears twice in the homing order
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    for axis in Axis::ALL {
        if let Some(axis_config) = config.axis(axis) {
            validate_axis(axis_config)?;
        }
    }

    validate_arc(&config.arc)?;
    validate_homing(&config.homing)?;

    Ok(())
}

/// Validate one axis configuration.
pub(crate) fn validate_axis(config: &AxisConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    // NaN fails this comparison too
    if !(config.drive_radius.0 > 0.0 && config.drive_radius.is_finite()) {
        return Err(Error::Config(ConfigError::InvalidDriveRadius(config.drive_radius.0)));
    }

    if config.pulse_width_us == 0 || config.pulse_width_us >= config.step_interval_us {
        return Err(Error::Config(ConfigError::InvalidPulseTiming {
            pulse_width_us: config.pulse_width_us,
            step_interval_us: config.step_interval_us,
        }));
    }

    if let Some(ref limits) = config.limits {
        if !limits.is_valid() {
            return Err(Error::Config(ConfigError::InvalidSoftLimits {
                min: limits.min.0,
                max: limits.max.0,
            }));
        }
    }

    if !(config.homing.max_travel.0 > 0.0 && config.homing.max_travel.is_finite()) {
        return Err(Error::Config(ConfigError::InvalidHomingTravel(
            config.homing.max_travel.0,
        )));
    }

    if config.homing.seek_steps == 0 {
        return Err(Error::Config(ConfigError::InvalidSeekSteps(config.homing.seek_steps)));
    }

    Ok(())
}

fn validate_arc(config: &ArcConfig) -> Result<()> {
    let step = config.step_angle.0;
    if !(step > 0.0 && step <= MAX_STEP_ANGLE_DEG) {
        return Err(Error::Config(ConfigError::InvalidArcStepAngle(step)));
    }

    let tolerance = config.radius_tolerance;
    if !(tolerance.0 > 0.0 && tolerance.is_finite()) {
        return Err(Error::Config(ConfigError::InvalidRadiusTolerance(tolerance.0)));
    }

    Ok(())
}

fn validate_homing(config: &HomingConfig) -> Result<()> {
    for (i, axis) in config.order.iter().enumerate() {
        if config.order[..i].contains(axis) {
            return Err(Error::Config(ConfigError::DuplicateHomingAxis(*axis)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Degrees, Millimeters};

    fn make_axis() -> AxisConfig {
        AxisConfig::new(2, 3, 4, 5, 200, Millimeters(6.0))
    }

    #[test]
    fn test_invalid_drive_radius() {
        let mut config = make_axis();
        config.drive_radius = Millimeters(-1.0);

        let result = validate_axis(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidDriveRadius(_)))
        ));
    }

    #[test]
    fn test_pulse_width_must_fit_interval() {
        let mut config = make_axis();
        config.pulse_width_us = 500;
        config.step_interval_us = 400;

        assert!(matches!(
            validate_axis(&config),
            Err(Error::Config(ConfigError::InvalidPulseTiming { .. }))
        ));
    }

    #[test]
    fn test_zero_seek_steps_rejected() {
        let mut config = make_axis();
        config.homing.seek_steps = 0;

        assert_eq!(
            validate_axis(&config),
            Err(Error::Config(ConfigError::InvalidSeekSteps(0)))
        );
    }

    #[test]
    fn test_arc_step_angle_range() {
        let mut arc = ArcConfig::default();
        assert!(validate_arc(&arc).is_ok());

        arc.step_angle = Degrees(0.0);
        assert!(validate_arc(&arc).is_err());

        arc.step_angle = Degrees(120.0);
        assert!(validate_arc(&arc).is_err());
    }

    #[test]
    fn test_duplicate_homing_axis() {
        let mut homing = HomingConfig::default();
        homing.order.clear();
        homing.order.push(Axis::X).unwrap();
        homing.order.push(Axis::X).unwrap();

        assert_eq!(
            validate_homing(&homing),
            Err(Error::Config(ConfigError::DuplicateHomingAxis(Axis::X)))
        );
    }

    #[test]
    fn test_empty_config_is_valid() {
        assert!(validate_config(&MachineConfig::default()).is_ok());
    }
}
