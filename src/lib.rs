//! # cnc-motion
//!
//! Three-axis stepper motion kernel for small CNC machines, built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Linear moves**: millimeter distances converted to STEP/DIR pulse trains
//! - **Arc interpolation**: circular XY moves in either winding, full circles included
//! - **Limit-switch homing**: bounded seek per axis, deterministic axis order
//! - **Position tracking**: commanded position kept in sync with issued pulses
//! - **Soft limits**: per-axis travel window checked before any pulse
//! - **Configuration-driven**: axis wiring and calibration from TOML files
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cnc_motion::{Axis, CncController, StepperAxisBuilder, UnitExt};
//!
//! let config = cnc_motion::load_config("mill.toml")?;
//!
//! let x = StepperAxisBuilder::new()
//!     .from_config(&config, Axis::X)?
//!     .step_pin(x_step)
//!     .dir_pin(x_dir)
//!     .enable_pin(x_en)
//!     .limit_pin(x_limit)
//!     .delay(delay)
//!     .build()?;
//!
//! let mut cnc = CncController::from_config(&config)?
//!     .with_x_axis(x)
//!     .with_y_axis(y)
//!     .with_z_axis(z);
//!
//! cnc.home()?;
//! cnc.move_x(25.0f32.mm())?;
//! cnc.move_arc_to(0.0, 0.0, 0.0, 25.0, false)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to the other modules
mod fmt;

// Core modules
pub mod axis;
pub mod config;
pub mod controller;
pub mod error;
pub mod motion;

// Re-exports for ergonomic API
pub use axis::{Axis, AxisDriver, Direction, StepperAxis, StepperAxisBuilder};
pub use config::{validate_config, AxisConfig, LimitPolicy, MachineConfig, SoftLimits};
pub use controller::CncController;
pub use error::{Error, Result};
pub use motion::{ArcPlan, ArcRequest, HomingSequencer, HomingState, LinearMove, PlanePoint, PositionModel, Winding};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, Microsteps, Millimeters, Steps, UnitExt};
