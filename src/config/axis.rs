//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::homing::AxisHomingConfig;
use super::limits::SoftLimits;
use super::units::{Microsteps, Millimeters};

/// Complete configuration of one axis from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default)]
    pub name: String<32>,

    /// STEP (pulse) pin number on the controller board.
    pub pulse_pin: u8,

    /// DIR pin number on the controller board.
    pub direction_pin: u8,

    /// Driver ENABLE pin number on the controller board.
    pub enable_pin: u8,

    /// Limit switch input pin number on the controller board.
    pub limit_pin: u8,

    /// Base steps per revolution (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Microstep setting (1, 2, 4, 8, 16, 32, etc.).
    #[serde(default)]
    pub microsteps: Microsteps,

    /// Radius of the pulley or pinion turning motor rotation into travel.
    ///
    /// One motor revolution moves the axis by `2 * PI * radius`.
    #[serde(rename = "drive_radius_mm")]
    pub drive_radius: Millimeters,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Limit switch reads high when pressed.
    #[serde(default)]
    pub limit_active_high: bool,

    /// Driver is enabled by pulling ENABLE low (A4988, DRV8825, TMC in STEP/DIR mode).
    #[serde(default = "default_true")]
    pub enable_active_low: bool,

    /// STEP high time in microseconds.
    #[serde(default = "default_pulse_width_us")]
    pub pulse_width_us: u32,

    /// Period between consecutive STEP rising edges in microseconds.
    #[serde(default = "default_step_interval_us")]
    pub step_interval_us: u32,

    /// Optional soft limits.
    #[serde(default)]
    pub limits: Option<SoftLimits>,

    /// Homing parameters.
    #[serde(default)]
    pub homing: AxisHomingConfig,
}

fn default_true() -> bool {
    true
}

fn default_pulse_width_us() -> u32 {
    2
}

fn default_step_interval_us() -> u32 {
    400
}

impl AxisConfig {
    /// Minimal configuration with default timing, no soft limits and default homing.
    pub fn new(
        pulse_pin: u8,
        direction_pin: u8,
        enable_pin: u8,
        limit_pin: u8,
        steps_per_revolution: u16,
        drive_radius: Millimeters,
    ) -> Self {
        Self {
            name: String::new(),
            pulse_pin,
            direction_pin,
            enable_pin,
            limit_pin,
            steps_per_revolution,
            microsteps: Microsteps::FULL,
            drive_radius,
            invert_direction: false,
            limit_active_high: false,
            enable_active_low: true,
            pulse_width_us: default_pulse_width_us(),
            step_interval_us: default_step_interval_us(),
            limits: None,
            homing: AxisHomingConfig::default(),
        }
    }

    /// Calculate total steps per motor revolution including microstepping.
    pub fn total_steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution as u32 * self.microsteps.value() as u32
    }

    /// Axis travel per motor revolution in millimeters.
    pub fn travel_per_revolution(&self) -> Millimeters {
        Millimeters(2.0 * core::f32::consts::PI * self.drive_radius.0)
    }

    /// Calculate steps per millimeter of travel.
    pub fn steps_per_mm(&self) -> f32 {
        self.total_steps_per_revolution() as f32 / self.travel_per_revolution().0
    }
}
