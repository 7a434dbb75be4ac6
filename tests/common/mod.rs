//! Simulated axis shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use cnc_motion::config::{AxisConfig, MechanicalConstraints};
use cnc_motion::{Axis, AxisDriver, CncController, Direction, Millimeters, Result};

/// Pulse trains issued by every axis, in order, as `(axis, pulses, direction)`.
pub type Journal = Rc<RefCell<Vec<(Axis, u32, Direction)>>>;

/// Axis model with a physical step counter and an optional limit switch.
///
/// The switch reads pressed once the carriage is at or past `limit_at` on the
/// homing side.
pub struct SimAxis {
    pub axis: Axis,
    pub constraints: MechanicalConstraints,
    pub steps: i64,
    pub limit_at: Option<i64>,
    pub forward_pulses: u64,
    pub reverse_pulses: u64,
    pub enabled: bool,
    pub journal: Journal,
}

impl SimAxis {
    pub fn new(axis: Axis, config: &AxisConfig, journal: Journal) -> Self {
        Self {
            axis,
            constraints: MechanicalConstraints::from_config(config),
            steps: 0,
            limit_at: None,
            forward_pulses: 0,
            reverse_pulses: 0,
            enabled: false,
            journal,
        }
    }

    pub fn with_limit_at(mut self, steps: i64) -> Self {
        self.limit_at = Some(steps);
        self
    }

    pub fn starting_at(mut self, steps: i64) -> Self {
        self.steps = steps;
        self
    }

    pub fn total_pulses(&self) -> u64 {
        self.forward_pulses + self.reverse_pulses
    }
}

impl AxisDriver for SimAxis {
    fn constraints(&self) -> &MechanicalConstraints {
        &self.constraints
    }

    fn step(&mut self, pulses: u32, direction: Direction) -> Result<()> {
        if pulses == 0 {
            return Ok(());
        }
        self.enabled = true;
        self.steps += pulses as i64 * direction.sign();
        match direction {
            Direction::Positive => self.forward_pulses += pulses as u64,
            Direction::Negative => self.reverse_pulses += pulses as u64,
        }
        self.journal.borrow_mut().push((self.axis, pulses, direction));
        Ok(())
    }

    fn is_limit_pressed(&mut self) -> Result<bool> {
        Ok(match (self.limit_at, self.constraints.homing.direction) {
            (Some(limit), Direction::Negative) => self.steps <= limit,
            (Some(limit), Direction::Positive) => self.steps >= limit,
            (None, _) => false,
        })
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.enabled = enabled;
        Ok(())
    }
}

pub type SimController = CncController<SimAxis, SimAxis, SimAxis>;

/// Axis calibrated to exactly 200 steps per millimeter (full steps, 1 mm per revolution).
pub fn axis_config() -> AxisConfig {
    AxisConfig::new(2, 3, 4, 5, 200, Millimeters(1.0 / (2.0 * core::f32::consts::PI)))
}

/// Controller with three simulated axes at 200 steps/mm and no soft limits.
pub fn sim_controller() -> (SimController, Journal) {
    let journal = Journal::default();
    let config = axis_config();
    let controller = SimController::new()
        .with_x_axis(SimAxis::new(Axis::X, &config, journal.clone()))
        .with_y_axis(SimAxis::new(Axis::Y, &config, journal.clone()))
        .with_z_axis(SimAxis::new(Axis::Z, &config, journal.clone()));
    (controller, journal)
}

pub fn mm(value: f32) -> Millimeters {
    Millimeters(value)
}

pub fn x(controller: &SimController) -> &SimAxis {
    controller.x_axis().unwrap()
}

pub fn y(controller: &SimController) -> &SimAxis {
    controller.y_axis().unwrap()
}

pub fn z(controller: &SimController) -> &SimAxis {
    controller.z_axis().unwrap()
}
