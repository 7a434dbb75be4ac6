//! Simulated three-axis mill.
//!
//! Builds STEP/DIR axes from a TOML configuration over in-memory pins, homes the
//! machine, then cuts a square pocket outline with rounded corners.
//!
//! Run with: `cargo run --example simulated_mill`

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use cnc_motion::{
    parse_config, Axis, CncController, Result, StepperAxis, StepperAxisBuilder, UnitExt,
};

const MILL_CONFIG: &str = r#"
[axes.x]
name = "X"
pulse_pin = 2
direction_pin = 3
enable_pin = 4
limit_pin = 5
steps_per_revolution = 200
microsteps = 4
drive_radius_mm = 6.366

[axes.x.limits]
min_mm = 0.0
max_mm = 120.0

[axes.y]
name = "Y"
pulse_pin = 6
direction_pin = 7
enable_pin = 8
limit_pin = 9
steps_per_revolution = 200
microsteps = 4
drive_radius_mm = 6.366

[axes.y.limits]
min_mm = 0.0
max_mm = 120.0

[axes.z]
name = "Z"
pulse_pin = 10
direction_pin = 11
enable_pin = 12
limit_pin = 13
steps_per_revolution = 200
microsteps = 4
drive_radius_mm = 1.273

[axes.z.homing]
direction = "positive"
max_travel_mm = 60.0

[arc]
step_angle_deg = 5.0
"#;

/// Physical carriage: net steps from the switch and the DIR level.
#[derive(Default)]
struct Carriage {
    steps: i64,
    dir_high: bool,
    pulses: u64,
}

type Shared = Rc<RefCell<Carriage>>;

struct StepPin(Shared);
struct DirPin(Shared);
struct EnablePin;
/// Active-low switch closing when the carriage reaches the switch position.
struct LimitPin {
    carriage: Shared,
    positive_side: bool,
}
struct NoDelay;

impl embedded_hal::digital::ErrorType for StepPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for StepPin {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        let mut carriage = self.0.borrow_mut();
        carriage.steps += if carriage.dir_high { 1 } else { -1 };
        carriage.pulses += 1;
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for DirPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for DirPin {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.borrow_mut().dir_high = true;
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.borrow_mut().dir_high = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for EnablePin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for EnablePin {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for LimitPin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for LimitPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        let steps = self.carriage.borrow().steps;
        let pressed = if self.positive_side { steps >= 0 } else { steps <= 0 };
        Ok(!pressed)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // A real board would busy-wait or use a hardware timer here
    }
}

type SimStepper = StepperAxis<StepPin, DirPin, EnablePin, LimitPin, NoDelay>;

fn build_axis(
    config: &cnc_motion::MachineConfig,
    axis: Axis,
    carriage: &Shared,
    positive_side: bool,
) -> Result<SimStepper> {
    StepperAxisBuilder::new()
        .from_config(config, axis)?
        .step_pin(StepPin(carriage.clone()))
        .dir_pin(DirPin(carriage.clone()))
        .enable_pin(EnablePin)
        .limit_pin(LimitPin {
            carriage: carriage.clone(),
            positive_side,
        })
        .delay(NoDelay)
        .build()
}

fn main() -> Result<()> {
    println!("=== Simulated Mill ===\n");

    let config = parse_config(MILL_CONFIG)?;

    // Carriages start somewhere away from their switches
    let carriages: [Shared; 3] = Default::default();
    carriages[0].borrow_mut().steps = 4_000;
    carriages[1].borrow_mut().steps = 2_500;
    carriages[2].borrow_mut().steps = -1_200;

    let mut mill = CncController::from_config(&config)?
        .with_x_axis(build_axis(&config, Axis::X, &carriages[0], false)?)
        .with_y_axis(build_axis(&config, Axis::Y, &carriages[1], false)?)
        .with_z_axis(build_axis(&config, Axis::Z, &carriages[2], true)?);

    println!("Homing in order {:?}", mill.homing_order());
    mill.home()?;
    report(&mill, &carriages);

    // Square pocket 40 x 40 mm with 5 mm corner radius, starting at (25, 20)
    mill.move_x(25.0f32.mm())?;
    mill.move_y(20.0f32.mm())?;
    mill.move_z((-2.0f32).mm())?;

    let r = 5.0f32;
    mill.move_x(30.0f32.mm())?;
    mill.move_arc_to(55.0, 20.0 + r, 55.0 + r, 20.0 + r, false)?;
    mill.move_y(30.0f32.mm())?;
    mill.move_arc_to(55.0, 50.0 + r, 55.0, 60.0, false)?;
    mill.move_x((-30.0f32).mm())?;
    mill.move_arc_to(25.0, 50.0 + r, 20.0, 50.0 + r, false)?;
    mill.move_y((-30.0f32).mm())?;
    mill.move_arc_to(25.0, 20.0 + r, 25.0, 20.0, false)?;
    report(&mill, &carriages);

    // Outside the travel window: rejected before any pulse
    match mill.move_x(200.0f32.mm()) {
        Ok(()) => println!("unexpected: move accepted"),
        Err(e) => println!("Rejected: {e}"),
    }

    mill.move_z(2.0f32.mm())?;
    mill.disable_motors()?;
    report(&mill, &carriages);

    println!("\n=== Done ===");
    Ok(())
}

fn report(mill: &CncController<SimStepper, SimStepper, SimStepper>, carriages: &[Shared; 3]) {
    let position = mill.position();
    println!(
        "position: X={:.3} Y={:.3} Z={:.3} mm",
        position.x().0,
        position.y().0,
        position.z().0
    );
    for (axis, carriage) in Axis::ALL.iter().zip(carriages) {
        let carriage = carriage.borrow();
        println!("  {axis}: {} steps from switch, {} pulses total", carriage.steps, carriage.pulses);
    }
}
