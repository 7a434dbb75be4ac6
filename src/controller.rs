//! Three-axis controller facade.
//!
//! Owns the axis drivers, the commanded position and the motion settings, and
//! exposes the machine-level operations: linear moves, arcs in the XY plane,
//! homing and position overrides.

use heapless::Vec;

use crate::axis::{Axis, AxisDriver};
use crate::config::units::Millimeters;
use crate::config::{
    validate_config, ArcConfig, HomingConfig, MachineConfig, MechanicalConstraints, SoftLimits,
};
use crate::error::{AxisError, ConfigError, Error, MotionError, Result};
use crate::motion::{ArcPlan, ArcRequest, HomingSequencer, LinearMove, PlanePoint, PositionModel};

/// A three-axis stepper machine.
///
/// Every operation validates its whole request (configured drivers, geometry and
/// soft limits) before the first pulse, and blocks until the last pulse is out.
///
/// # Example
///
/// ```rust,ignore
/// use cnc_motion::{ArcRequest, CncController};
///
/// let mut cnc = CncController::from_config(&config)?
///     .with_x_axis(x)
///     .with_y_axis(y)
///     .with_z_axis(z);
///
/// cnc.home()?;
/// cnc.move_x(10.0f32.mm())?;
/// cnc.move_arc(&ArcRequest::counter_clockwise(0.0, 0.0, 0.0, 10.0))?;
/// ```
pub struct CncController<X, Y, Z> {
    x: Option<X>,
    y: Option<Y>,
    z: Option<Z>,
    position: PositionModel,
    arc: ArcConfig,
    homing_order: Vec<Axis, 3>,
}

impl<X, Y, Z> Default for CncController<X, Y, Z>
where
    X: AxisDriver,
    Y: AxisDriver,
    Z: AxisDriver,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X, Y, Z> CncController<X, Y, Z>
where
    X: AxisDriver,
    Y: AxisDriver,
    Z: AxisDriver,
{
    /// Controller with no drivers, default arc and homing settings, at the origin.
    pub fn new() -> Self {
        Self {
            x: None,
            y: None,
            z: None,
            position: PositionModel::new(),
            arc: ArcConfig::default(),
            homing_order: HomingConfig::default().sequence(),
        }
    }

    /// Controller with arc and homing settings taken from a machine configuration.
    ///
    /// Drivers still have to be attached, since they own the hardware pins.
    ///
    /// # Errors
    ///
    /// Returns the first validation error in `config`.
    pub fn from_config(config: &MachineConfig) -> Result<Self> {
        validate_config(config)?;

        let mut controller = Self::new();
        controller.arc = config.arc;
        controller.homing_order = config.homing.sequence();
        Ok(controller)
    }

    /// Attach or replace the X driver.
    pub fn set_x_axis(&mut self, driver: X) {
        self.x = Some(driver);
    }

    /// Attach or replace the Y driver.
    pub fn set_y_axis(&mut self, driver: Y) {
        self.y = Some(driver);
    }

    /// Attach or replace the Z driver.
    pub fn set_z_axis(&mut self, driver: Z) {
        self.z = Some(driver);
    }

    /// Builder form of [`set_x_axis`](Self::set_x_axis).
    pub fn with_x_axis(mut self, driver: X) -> Self {
        self.set_x_axis(driver);
        self
    }

    /// Builder form of [`set_y_axis`](Self::set_y_axis).
    pub fn with_y_axis(mut self, driver: Y) -> Self {
        self.set_y_axis(driver);
        self
    }

    /// Builder form of [`set_z_axis`](Self::set_z_axis).
    pub fn with_z_axis(mut self, driver: Z) -> Self {
        self.set_z_axis(driver);
        self
    }

    /// X driver, if attached.
    pub fn x_axis(&self) -> Option<&X> {
        self.x.as_ref()
    }

    /// Y driver, if attached.
    pub fn y_axis(&self) -> Option<&Y> {
        self.y.as_ref()
    }

    /// Z driver, if attached.
    pub fn z_axis(&self) -> Option<&Z> {
        self.z.as_ref()
    }

    /// Detach all drivers, returning them.
    pub fn into_axes(self) -> (Option<X>, Option<Y>, Option<Z>) {
        (self.x, self.y, self.z)
    }

    /// True if a driver is attached for `axis`.
    pub fn is_configured(&self, axis: Axis) -> bool {
        self.driver(axis).is_ok()
    }

    /// Arc interpolation settings in use.
    pub fn arc_config(&self) -> &ArcConfig {
        &self.arc
    }

    /// Axes in the order `home()` visits them.
    pub fn homing_order(&self) -> &[Axis] {
        &self.homing_order
    }

    /// Commanded position of all three axes.
    #[inline]
    pub fn position(&self) -> PositionModel {
        self.position
    }

    /// Commanded position of one axis.
    #[inline]
    pub fn axis_position(&self, axis: Axis) -> Millimeters {
        self.position.get(axis)
    }

    /// Move X by `distance`.
    pub fn move_x(&mut self, distance: Millimeters) -> Result<()> {
        self.move_axis(Axis::X, distance)
    }

    /// Move Y by `distance`.
    pub fn move_y(&mut self, distance: Millimeters) -> Result<()> {
        self.move_axis(Axis::Y, distance)
    }

    /// Move Z by `distance`.
    pub fn move_z(&mut self, distance: Millimeters) -> Result<()> {
        self.move_axis(Axis::Z, distance)
    }

    /// Move one axis by a signed distance relative to its commanded position.
    ///
    /// # Errors
    ///
    /// - `ConfigError::AxisNotConfigured` if no driver is attached
    /// - `MotionError::NonFinite` for a NaN or infinite distance
    /// - `AxisError::LimitExceeded` if the target leaves the soft limits under the
    ///   `reject` policy (the `clamp` policy moves to the nearest limit instead)
    /// - `MotionError::Overflow` if the pulse count does not fit `u32`
    ///
    /// No pulse is issued when any of these is returned.
    pub fn move_axis(&mut self, axis: Axis, distance: Millimeters) -> Result<()> {
        self.driver(axis)?;
        if !distance.is_finite() {
            warn!("move {}: non-finite distance rejected", axis);
            return Err(MotionError::NonFinite.into());
        }

        let target = self.position.get(axis) + distance;
        self.move_axis_to(axis, target)
    }

    /// Move along a circular arc in the XY plane from the current position.
    ///
    /// The arc is approximated by straight segments no longer than the configured
    /// step angle; each segment is an X move followed by a Y move. The final
    /// position is exactly the requested endpoint.
    ///
    /// # Errors
    ///
    /// - `ConfigError::AxisNotConfigured` if X or Y has no driver
    /// - `MotionError::InvalidGeometry` for a zero radius or a start point off the circle
    /// - `AxisError::LimitExceeded` if any interpolated point leaves the soft limits,
    ///   under either policy; a clamped arc would not end on the requested endpoint
    ///
    /// Every check covers the whole arc before the first pulse.
    pub fn move_arc(&mut self, request: &ArcRequest) -> Result<()> {
        let x = self.driver(Axis::X)?.constraints();
        let y = self.driver(Axis::Y)?.constraints();

        let start = PlanePoint::new(self.position.x(), self.position.y());
        let plan = match ArcPlan::new(start, request, &self.arc) {
            Ok(plan) => plan,
            Err(e) => {
                warn!("arc rejected: {}", e);
                return Err(e);
            }
        };

        let mut previous = start;
        for point in plan.points() {
            within_limits(Axis::X, x, point.x)?;
            within_limits(Axis::Y, y, point.y)?;
            LinearMove::to_target(previous.x, point.x, x)?;
            LinearMove::to_target(previous.y, point.y, y)?;
            previous = point;
        }

        info!(
            "arc: r={} mm, sweep={} rad, {} segments",
            plan.radius().0,
            plan.sweep(),
            plan.segments()
        );

        for point in plan.points() {
            self.move_axis_to(Axis::X, point.x)?;
            self.move_axis_to(Axis::Y, point.y)?;
        }
        Ok(())
    }

    /// Arc to `(end_x, end_y)` around `(center_x, center_y)`.
    pub fn move_arc_to(
        &mut self,
        center_x: f32,
        center_y: f32,
        end_x: f32,
        end_y: f32,
        is_clockwise: bool,
    ) -> Result<()> {
        let request = if is_clockwise {
            ArcRequest::clockwise(center_x, center_y, end_x, end_y)
        } else {
            ArcRequest::counter_clockwise(center_x, center_y, end_x, end_y)
        };
        self.move_arc(&request)
    }

    /// Home every axis against its limit switch.
    ///
    /// Axes are homed one at a time in the configured order (Z, X, Y by
    /// default). Each homed axis is set to exactly zero.
    ///
    /// # Errors
    ///
    /// `ConfigError::AxisNotConfigured` if any axis lacks a driver (nothing moves),
    /// or `HomingError::Timeout` for the first axis whose switch never trips.
    /// Axes homed before a timeout keep their new zero.
    pub fn home(&mut self) -> Result<()> {
        for axis in Axis::ALL {
            self.driver(axis)?;
        }

        let order = self.homing_order.clone();
        for axis in order {
            self.home_axis(axis)?;
        }
        Ok(())
    }

    /// Home a single axis.
    ///
    /// On success the axis position is exactly zero. On timeout no further
    /// pulses are issued and the position is left untouched.
    pub fn home_axis(&mut self, axis: Axis) -> Result<()> {
        let driver = self.driver_mut(axis)?;
        let homing = driver.constraints().homing;

        info!("homing {}: budget {} steps", axis, homing.max_steps);
        let mut sequencer = HomingSequencer::new(axis, homing);
        let steps = sequencer.run(driver)?;
        info!("homing {}: limit reached after {} steps", axis, steps);

        self.position.reset(axis);
        Ok(())
    }

    /// Overwrite the commanded position of all three axes without moving.
    pub fn set_relative_position(&mut self, x: Millimeters, y: Millimeters, z: Millimeters) {
        debug!("position set to ({}, {}, {})", x.0, y.0, z.0);
        self.position.set_all(x, y, z);
    }

    /// Overwrite the commanded position of one axis without moving.
    pub fn set_axis_position(&mut self, axis: Axis, value: Millimeters) {
        debug!("position {} set to {}", axis, value.0);
        self.position.set(axis, value);
    }

    /// Release every attached motor driver.
    ///
    /// All drivers are released even if one fails; the first error is returned.
    pub fn disable_motors(&mut self) -> Result<()> {
        let mut result = Ok(());
        for axis in Axis::ALL {
            if let Ok(driver) = self.driver_mut(axis) {
                if let Err(e) = driver.set_enabled(false) {
                    if result.is_ok() {
                        result = Err(e);
                    }
                }
            }
        }
        result
    }

    fn move_axis_to(&mut self, axis: Axis, target: Millimeters) -> Result<()> {
        let from = self.position.get(axis);
        let driver = self.driver_mut(axis)?;

        let target = limited_target(axis, driver.constraints(), target)?;
        let mv = LinearMove::to_target(from, target, driver.constraints())?;

        debug!("move {}: {} -> {} mm, {} pulses", axis, from.0, target.0, mv.pulses);
        driver.step(mv.pulses, mv.direction)?;

        self.position.set(axis, target);
        Ok(())
    }

    fn driver(&self, axis: Axis) -> Result<&dyn AxisDriver> {
        let driver: Option<&dyn AxisDriver> = match axis {
            Axis::X => self.x.as_ref().map(|d| d as &dyn AxisDriver),
            Axis::Y => self.y.as_ref().map(|d| d as &dyn AxisDriver),
            Axis::Z => self.z.as_ref().map(|d| d as &dyn AxisDriver),
        };
        driver.ok_or(Error::Config(ConfigError::AxisNotConfigured(axis)))
    }

    fn driver_mut(&mut self, axis: Axis) -> Result<&mut dyn AxisDriver> {
        let driver: Option<&mut dyn AxisDriver> = match axis {
            Axis::X => self.x.as_mut().map(|d| d as &mut dyn AxisDriver),
            Axis::Y => self.y.as_mut().map(|d| d as &mut dyn AxisDriver),
            Axis::Z => self.z.as_mut().map(|d| d as &mut dyn AxisDriver),
        };
        driver.ok_or(Error::Config(ConfigError::AxisNotConfigured(axis)))
    }
}

/// Apply the soft-limit policy of an axis to a target.
fn limited_target(
    axis: Axis,
    constraints: &MechanicalConstraints,
    target: Millimeters,
) -> Result<Millimeters> {
    match (constraints.check_limits(target), constraints.limits) {
        (Some(allowed), _) => Ok(allowed),
        (None, Some(limits)) => Err(limit_exceeded(axis, &limits, target)),
        (None, None) => Ok(target),
    }
}

/// Require a target inside the soft limits regardless of the axis policy.
fn within_limits(axis: Axis, constraints: &MechanicalConstraints, target: Millimeters) -> Result<()> {
    match constraints.limits {
        Some(limits) if !limits.contains(target) => Err(limit_exceeded(axis, &limits, target)),
        _ => Ok(()),
    }
}

fn limit_exceeded(axis: Axis, limits: &SoftLimits, target: Millimeters) -> Error {
    warn!(
        "move {}: target {} outside [{}, {}]",
        axis, target.0, limits.min.0, limits.max.0
    );
    AxisError::LimitExceeded {
        axis,
        target: target.0,
        min: limits.min.0,
        max: limits.max.0,
    }
    .into()
}
