//! Integration tests for cnc-motion.
//!
//! These tests verify the workflow from TOML parsing to pulses on the pins.

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

use cnc_motion::config::units::{Degrees, Microsteps, Millimeters};
use cnc_motion::config::{LimitPolicy, MachineConfig, MechanicalConstraints, SoftLimits};
use cnc_motion::error::{ConfigError, Error};
use cnc_motion::{parse_config, Axis, CncController, Direction, StepperAxis, StepperAxisBuilder};

mod common;
use common::{axis_config, SimAxis};

// =============================================================================
// Test configuration data
// =============================================================================

const MINIMAL_CONFIG: &str = r#"
[axes.x]
pulse_pin = 2
direction_pin = 3
enable_pin = 4
limit_pin = 5
steps_per_revolution = 200
drive_radius_mm = 6.0
"#;

const FULL_CONFIG: &str = r#"
[axes.x]
name = "X"
pulse_pin = 2
direction_pin = 3
enable_pin = 4
limit_pin = 5
steps_per_revolution = 200
microsteps = 16
drive_radius_mm = 6.0
invert_direction = false
limit_active_high = false
enable_active_low = true
pulse_width_us = 2
step_interval_us = 400

[axes.x.limits]
min_mm = 0.0
max_mm = 300.0
policy = "reject"

[axes.x.homing]
direction = "negative"
seek_steps = 1
max_travel_mm = 350.0

[axes.y]
name = "Y"
pulse_pin = 6
direction_pin = 7
enable_pin = 8
limit_pin = 9
steps_per_revolution = 200
microsteps = 8
drive_radius_mm = 6.0
invert_direction = true

[axes.y.limits]
min_mm = 0.0
max_mm = 200.0
policy = "clamp"

[axes.z]
name = "Z"
pulse_pin = 10
direction_pin = 11
enable_pin = 12
limit_pin = 13
steps_per_revolution = 400
microsteps = 4
drive_radius_mm = 3.0

[axes.z.homing]
direction = "positive"
seek_steps = 4
max_travel_mm = 80.0

[arc]
step_angle_deg = 2.0
radius_tolerance_mm = 0.1

[homing]
order = ["z", "y", "x"]
"#;

fn axis_toml(extra: &str) -> String {
    format!("{MINIMAL_CONFIG}{extra}")
}

// =============================================================================
// TOML parsing
// =============================================================================

#[test]
fn parse_minimal_axis_config() {
    let config = parse_config(MINIMAL_CONFIG).expect("Should parse minimal config");

    let x = config.axes.x.as_ref().expect("X axis should exist");
    assert_eq!(x.pulse_pin, 2);
    assert_eq!(x.limit_pin, 5);
    assert_eq!(x.steps_per_revolution, 200);
    assert_eq!(x.microsteps, Microsteps::FULL);
    assert_eq!(x.pulse_width_us, 2);
    assert_eq!(x.step_interval_us, 400);
    assert!(x.enable_active_low);
    assert!(x.limits.is_none());

    assert!(config.axes.y.is_none());
    assert_eq!(config.configured_axes().collect::<Vec<_>>(), [Axis::X]);
    assert_eq!(config.homing.order.as_slice(), &[Axis::Z, Axis::X, Axis::Y]);
    assert_eq!(config.arc.step_angle, Degrees(1.0));
}

#[test]
fn parse_full_machine_config() {
    let config = parse_config(FULL_CONFIG).expect("Should parse full config");

    let x = config.axis(Axis::X).unwrap();
    assert_eq!(x.name.as_str(), "X");
    assert_eq!(x.microsteps, Microsteps::SIXTEENTH);
    let limits = x.limits.expect("X should have limits");
    assert_eq!(limits.max, Millimeters(300.0));
    assert_eq!(limits.policy, LimitPolicy::Reject);
    assert_eq!(x.homing.max_travel, Millimeters(350.0));

    let y = config.axis(Axis::Y).unwrap();
    assert!(y.invert_direction);
    assert_eq!(y.limits.unwrap().policy, LimitPolicy::Clamp);

    let z = config.axis(Axis::Z).unwrap();
    assert_eq!(z.homing.direction, Direction::Positive);
    assert_eq!(z.homing.seek_steps, 4);

    assert_eq!(config.arc.step_angle, Degrees(2.0));
    assert_eq!(config.arc.radius_tolerance, Millimeters(0.1));
    assert_eq!(config.homing.order.as_slice(), &[Axis::Z, Axis::Y, Axis::X]);
}

#[test]
fn parse_microstep_values() {
    let valid_microsteps = [
        (1, Microsteps::FULL),
        (2, Microsteps::HALF),
        (4, Microsteps::QUARTER),
        (8, Microsteps::EIGHTH),
        (16, Microsteps::SIXTEENTH),
        (32, Microsteps::THIRTY_SECOND),
    ];

    for (ms_value, expected) in valid_microsteps {
        let toml = axis_toml(&format!("microsteps = {ms_value}\n"));
        let config = parse_config(&toml).unwrap_or_else(|_| panic!("Microsteps {ms_value} should parse"));
        assert_eq!(config.axes.x.unwrap().microsteps, expected);
    }

    let toml = axis_toml("microsteps = 3\n");
    assert!(parse_config(&toml).is_err());
}

#[test]
fn parse_limit_policies() {
    for (policy_str, expected) in [("clamp", LimitPolicy::Clamp), ("reject", LimitPolicy::Reject)] {
        let toml = axis_toml(&format!(
            "\n[axes.x.limits]\nmin_mm = 0.0\nmax_mm = 100.0\npolicy = \"{policy_str}\"\n"
        ));
        let config = parse_config(&toml).unwrap_or_else(|_| panic!("Policy '{policy_str}' should parse"));
        assert_eq!(config.axes.x.unwrap().limits.unwrap().policy, expected);
    }
}

#[test]
fn unknown_axis_in_homing_order_fails_to_parse() {
    let toml = axis_toml("\n[homing]\norder = [\"x\", \"w\"]\n");
    assert!(matches!(parse_config(&toml), Err(Error::Config(ConfigError::ParseError(_)))));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn reject_pulse_width_longer_than_interval() {
    let toml = axis_toml("pulse_width_us = 500\nstep_interval_us = 400\n");
    assert!(matches!(
        parse_config(&toml),
        Err(Error::Config(ConfigError::InvalidPulseTiming {
            pulse_width_us: 500,
            step_interval_us: 400
        }))
    ));
}

#[test]
fn reject_inverted_soft_limits() {
    let toml = axis_toml("\n[axes.x.limits]\nmin_mm = 50.0\nmax_mm = 10.0\n");
    assert!(matches!(
        parse_config(&toml),
        Err(Error::Config(ConfigError::InvalidSoftLimits { .. }))
    ));
}

#[test]
fn reject_duplicate_homing_axis() {
    let toml = axis_toml("\n[homing]\norder = [\"x\", \"x\"]\n");
    assert_eq!(
        parse_config(&toml).unwrap_err(),
        Error::Config(ConfigError::DuplicateHomingAxis(Axis::X))
    );
}

#[test]
fn reject_out_of_range_arc_step() {
    let toml = axis_toml("\n[arc]\nstep_angle_deg = 120.0\n");
    assert!(matches!(
        parse_config(&toml),
        Err(Error::Config(ConfigError::InvalidArcStepAngle(_)))
    ));
}

#[test]
fn load_config_from_file() {
    let path = std::env::temp_dir().join(format!("cnc-motion-{}.toml", std::process::id()));
    std::fs::write(&path, FULL_CONFIG).unwrap();

    let config = cnc_motion::load_config(&path);
    std::fs::remove_file(&path).ok();

    let config = config.expect("Config file should load");
    assert_eq!(config.configured_axes().count(), 3);
}

// =============================================================================
// Mechanical constraints
// =============================================================================

#[test]
fn mechanical_constraints_derivation() {
    let config = parse_config(FULL_CONFIG).unwrap();
    let constraints = MechanicalConstraints::from_config(config.axis(Axis::X).unwrap());

    // 200 steps * 16 microsteps = 3200 steps/rev
    assert_eq!(constraints.steps_per_revolution, 3200);

    // 2 * pi * 6 mm ≈ 37.70 mm/rev, 3200 / 37.70 ≈ 84.88 steps/mm
    assert!((constraints.travel_per_revolution.0 - 37.699).abs() < 0.01);
    assert!((constraints.steps_per_mm - 84.883).abs() < 0.01);

    assert_eq!(constraints.pulse_width_ns, 2_000);
    assert_eq!(constraints.step_interval_ns, 400_000);

    // 350 mm * 84.883 steps/mm, rounded up
    assert_eq!(constraints.homing.max_steps, 29_709);
}

#[test]
fn soft_limit_policies() {
    let clamp = SoftLimits::new(Millimeters(0.0), Millimeters(100.0), LimitPolicy::Clamp);
    assert_eq!(clamp.apply(Millimeters(50.0)), Some(Millimeters(50.0)));
    assert_eq!(clamp.apply(Millimeters(-5.0)), Some(Millimeters(0.0)));
    assert_eq!(clamp.apply(Millimeters(105.0)), Some(Millimeters(100.0)));

    let reject = SoftLimits::new(Millimeters(0.0), Millimeters(100.0), LimitPolicy::Reject);
    assert_eq!(reject.apply(Millimeters(100.0)), Some(Millimeters(100.0)));
    assert_eq!(reject.apply(Millimeters(100.5)), None);
}

// =============================================================================
// Axis construction
// =============================================================================

type MockAxis = StepperAxis<PinMock, PinMock, PinMock, PinMock, NoopDelay>;

#[test]
fn builder_reports_unconfigured_axis() {
    let config = parse_config(MINIMAL_CONFIG).unwrap();

    let result = StepperAxisBuilder::<PinMock, PinMock, PinMock, PinMock, NoopDelay>::new()
        .from_config(&config, Axis::Z);
    assert!(matches!(result, Err(Error::Config(ConfigError::AxisNotConfigured(Axis::Z)))));
}

#[test]
fn builder_reports_missing_pin() {
    let config = parse_config(MINIMAL_CONFIG).unwrap();
    let mut step = PinMock::new(&[]);

    let result = StepperAxisBuilder::<PinMock, PinMock, PinMock, PinMock, NoopDelay>::new()
        .from_config(&config, Axis::X)
        .unwrap()
        .step_pin(step.clone())
        .delay(NoopDelay::new())
        .build();
    assert!(matches!(result, Err(Error::Config(ConfigError::MissingField(_)))));

    step.done();
}

// =============================================================================
// Config to pins
// =============================================================================

#[test]
fn controller_drives_pins_from_config() {
    // 1 mm per revolution at 200 full steps: 0.015 mm is 3 pulses
    let toml = r#"
[axes.x]
pulse_pin = 2
direction_pin = 3
enable_pin = 4
limit_pin = 5
steps_per_revolution = 200
drive_radius_mm = 0.15915494
"#;
    let config: MachineConfig = parse_config(toml).unwrap();

    let mut step_expectations = Vec::new();
    for _ in 0..3 {
        step_expectations.push(PinTransaction::set(PinState::High));
        step_expectations.push(PinTransaction::set(PinState::Low));
    }
    let mut step = PinMock::new(&step_expectations);
    let mut dir = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let mut enable = PinMock::new(&[PinTransaction::set(PinState::Low), PinTransaction::set(PinState::High)]);
    let mut limit = PinMock::new(&[]);

    let x: MockAxis = StepperAxisBuilder::new()
        .from_config(&config, Axis::X)
        .unwrap()
        .step_pin(step.clone())
        .dir_pin(dir.clone())
        .enable_pin(enable.clone())
        .limit_pin(limit.clone())
        .delay(NoopDelay::new())
        .build()
        .unwrap();

    let y = SimAxis::new(Axis::Y, &axis_config(), Default::default());
    let z = SimAxis::new(Axis::Z, &axis_config(), Default::default());

    let mut cnc = CncController::from_config(&config)
        .unwrap()
        .with_x_axis(x)
        .with_y_axis(y)
        .with_z_axis(z);

    cnc.move_x(Millimeters(0.015)).unwrap();
    assert_eq!(cnc.x_axis().unwrap().issued_steps().value(), 3);
    assert_eq!(cnc.axis_position(Axis::X), Millimeters(0.015));

    cnc.disable_motors().unwrap();
    assert!(!cnc.x_axis().unwrap().is_enabled());

    step.done();
    dir.done();
    enable.done();
    limit.done();
}

#[test]
fn controller_takes_arc_and_homing_settings_from_config() {
    let config = parse_config(FULL_CONFIG).unwrap();
    let cnc = common::SimController::from_config(&config).unwrap();

    assert_eq!(cnc.arc_config().step_angle, Degrees(2.0));
    assert_eq!(cnc.homing_order(), &[Axis::Z, Axis::Y, Axis::X]);
    assert!(!cnc.is_configured(Axis::X));
}
