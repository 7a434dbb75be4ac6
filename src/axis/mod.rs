//! Axis module for cnc-motion.
//!
//! Provides the axis driver abstraction consumed by the motion core and a
//! STEP/DIR implementation over embedded-hal pins.

mod builder;
mod driver;
mod id;
mod stepper;

pub use builder::StepperAxisBuilder;
pub use driver::AxisDriver;
pub use id::{Axis, Direction};
pub use stepper::StepperAxis;
