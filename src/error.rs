//! Error types for cnc-motion.
//!
//! Provides unified error handling across configuration, axis drivers, motion and homing.
//! Every check that can reject a command runs before the first pulse is issued.

use core::fmt;

use crate::axis::Axis;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all cnc-motion operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing, validation or setup error
    Config(ConfigError),
    /// Axis driver error
    Axis(AxisError),
    /// Motion request error
    Motion(MotionError),
    /// Homing sequence error
    Homing(HomingError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Invalid base steps per revolution (must be > 0)
    InvalidStepsPerRevolution(u16),
    /// Invalid drive radius (must be finite and > 0)
    InvalidDriveRadius(f32),
    /// Pulse width must be > 0 and shorter than the step interval
    InvalidPulseTiming {
        /// Pulse width in microseconds
        pulse_width_us: u32,
        /// Step interval in microseconds
        step_interval_us: u32,
    },
    /// Invalid soft limits (min must be < max)
    InvalidSoftLimits {
        /// Minimum limit value
        min: f32,
        /// Maximum limit value
        max: f32,
    },
    /// Invalid arc interpolation step angle (must be within (0, 90] degrees)
    InvalidArcStepAngle(f32),
    /// Invalid arc radius tolerance (must be finite and > 0)
    InvalidRadiusTolerance(f32),
    /// Invalid homing travel bound (must be finite and > 0)
    InvalidHomingTravel(f32),
    /// Invalid homing seek chunk (must be > 0)
    InvalidSeekSteps(u32),
    /// Axis listed twice in the homing order
    DuplicateHomingAxis(Axis),
    /// Required builder field missing
    MissingField(&'static str),
    /// Axis used before a driver was configured for it
    AxisNotConfigured(Axis),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis driver errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisError {
    /// Pin operation failed
    PinError,
    /// Target position exceeds soft limits
    LimitExceeded {
        /// Axis that would leave its travel window
        axis: Axis,
        /// Requested target in millimeters
        target: f32,
        /// Minimum limit in millimeters
        min: f32,
        /// Maximum limit in millimeters
        max: f32,
    },
}

/// Motion request errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Arc request is geometrically inconsistent
    InvalidGeometry(GeometryError),
    /// Distance or coordinate is NaN or infinite
    NonFinite,
    /// Pulse count does not fit the driver's counter
    Overflow,
}

/// Reasons an arc request is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Endpoint coincides with the center
    ZeroRadius,
    /// Current position and endpoint lie at different distances from the center
    RadiusMismatch {
        /// Distance from center to current position
        start: f32,
        /// Distance from center to endpoint
        end: f32,
    },
}

/// Homing sequence errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingError {
    /// Limit switch never tripped within the step budget
    Timeout {
        /// Axis being homed
        axis: Axis,
        /// Pulses issued before giving up
        steps: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidDriveRadius(v) => write!(f, "Invalid drive radius: {} mm. Must be > 0", v),
            ConfigError::InvalidPulseTiming { pulse_width_us, step_interval_us } => write!(
                f,
                "Invalid pulse timing: width {} us must be > 0 and < step interval {} us",
                pulse_width_us, step_interval_us
            ),
            ConfigError::InvalidSoftLimits { min, max } => {
                write!(f, "Invalid soft limits: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvalidArcStepAngle(v) => {
                write!(f, "Invalid arc step angle: {} deg. Must be in (0, 90]", v)
            }
            ConfigError::InvalidRadiusTolerance(v) => {
                write!(f, "Invalid arc radius tolerance: {} mm. Must be > 0", v)
            }
            ConfigError::InvalidHomingTravel(v) => {
                write!(f, "Invalid homing max travel: {} mm. Must be > 0", v)
            }
            ConfigError::InvalidSeekSteps(v) => write!(f, "Invalid homing seek steps: {}. Must be > 0", v),
            ConfigError::DuplicateHomingAxis(axis) => {
                write!(f, "Axis {} appears more than once in the homing order", axis)
            }
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::AxisNotConfigured(axis) => write!(f, "Axis {} has no driver configured", axis),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::PinError => write!(f, "GPIO pin operation failed"),
            AxisError::LimitExceeded { axis, target, min, max } => write!(
                f,
                "Axis {} target {} mm exceeds limits [{}, {}]",
                axis, target, min, max
            ),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::InvalidGeometry(e) => write!(f, "Invalid arc geometry: {}", e),
            MotionError::NonFinite => write!(f, "Distance or coordinate is not finite"),
            MotionError::Overflow => write!(f, "Pulse count overflow"),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ZeroRadius => write!(f, "endpoint coincides with the center"),
            GeometryError::RadiusMismatch { start, end } => write!(
                f,
                "start radius {} mm does not match end radius {} mm",
                start, end
            ),
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::Timeout { axis, steps } => write!(
                f,
                "Axis {} limit switch not reached after {} steps",
                axis, steps
            ),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Motion(MotionError::InvalidGeometry(e))
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}
