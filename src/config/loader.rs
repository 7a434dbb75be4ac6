//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::MachineConfig;

/// Load machine configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use cnc_motion::load_config;
///
/// let config = load_config("machine.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MachineConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse machine configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<MachineConfig> {
    let config: MachineConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

/// Fit a message into the fixed-size error string, cutting on a char boundary.
fn truncated(message: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in message.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[axes.x]
pulse_pin = 2
direction_pin = 3
enable_pin = 4
limit_pin = 5
steps_per_revolution = 200
drive_radius_mm = 6.0
"#;

        let config = parse_config(toml).unwrap();
        assert!(config.axis(Axis::X).is_some());
        assert!(config.axis(Axis::Y).is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let toml = r#"
[axes.z]
pulse_pin = 8
direction_pin = 9
enable_pin = 10
limit_pin = 11
steps_per_revolution = 200
drive_radius_mm = 0.0
"#;

        let result = parse_config(toml);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidDriveRadius(_)))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[axes.x]\npulse_pin = \"two\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/machine.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }

    #[test]
    fn test_truncated_long_message() {
        let long = "é".repeat(200);
        let msg = truncated(&long);
        assert_eq!(msg.chars().count(), 64);
    }
}
