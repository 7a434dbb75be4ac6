//! Configuration module for cnc-motion.
//!
//! Provides types for loading and validating axis, arc and homing configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod arc;
mod axis;
mod homing;
mod limits;
mod mechanical;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use arc::ArcConfig;
pub use axis::AxisConfig;
pub use homing::{AxisHomingConfig, HomingConfig};
pub use limits::{LimitPolicy, SoftLimits};
pub use mechanical::{HomingConstraints, MechanicalConstraints};
pub use system::{AxesConfig, MachineConfig};
pub use validation::validate_config;
pub(crate) use validation::validate_axis;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Microsteps, Millimeters, Steps};
