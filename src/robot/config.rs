//! Robot configuration.

use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Tuning values for sensors, motors and the driver loop.
///
/// Missing fields take their defaults, unknown fields are rejected.
///
/// # Example
///
/// ```rust
/// use zumo_hsm::robot::RobotConfig;
///
/// let config = RobotConfig::from_json(r#"{ "encoder_counts_per_degree": 6 }"#).unwrap();
/// assert_eq!(config.encoder_counts_per_degree, 6);
/// assert_eq!(config.max_speed, 400);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobotConfig {
    /// Line sensor readings below this are the ring boundary
    pub boundary_threshold: u16,
    /// Proximity counts at or above this are a detection
    pub proximity_threshold: u8,
    /// Left encoder counts per degree of in-place rotation.
    /// 4 for 50:1 gearing, 6 for 75:1, 8 for 100:1.
    pub encoder_counts_per_degree: i32,
    /// Motor speeds are clipped to `-max_speed..=max_speed`
    pub max_speed: i16,
    /// Events held between polls
    pub queue_capacity: usize,
    /// Transitions retained by the machine's log
    pub log_capacity: usize,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            boundary_threshold: 250,
            proximity_threshold: 1,
            encoder_counts_per_degree: 4,
            max_speed: 400,
            queue_capacity: 8,
            log_capacity: 32,
        }
    }
}

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("encoder_counts_per_degree must be positive (got {0})")]
    EncoderCounts(i32),

    #[error("max_speed must be positive (got {0})")]
    MaxSpeed(i16),

    #[error("queue_capacity must hold at least one event per input source (got {0})")]
    QueueCapacity(usize),
}

/// Errors loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ConfigViolation>),
}

impl RobotConfig {
    /// Input sources that can each contribute one event per poll.
    pub const INPUT_SOURCES: usize = 5;

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn check(&self) -> Result<(), ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    /// Check every value, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = vec![
            if self.encoder_counts_per_degree > 0 {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::EncoderCounts(
                    self.encoder_counts_per_degree,
                ))
            },
            if self.max_speed > 0 {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::MaxSpeed(self.max_speed))
            },
            if self.queue_capacity >= Self::INPUT_SOURCES {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::QueueCapacity(self.queue_capacity))
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RobotConfig::default().validate().is_success());
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = RobotConfig::from_json("{}").unwrap();
        assert_eq!(config, RobotConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = RobotConfig::from_json(r#"{ "max_sped": 300 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let result = RobotConfig::from_json(
            r#"{ "encoder_counts_per_degree": 0, "max_speed": -5, "queue_capacity": 2 }"#,
        );

        match result {
            Err(ConfigError::Invalid(violations)) => {
                assert_eq!(
                    violations,
                    vec![
                        ConfigViolation::EncoderCounts(0),
                        ConfigViolation::MaxSpeed(-5),
                        ConfigViolation::QueueCapacity(2),
                    ]
                );
            }
            other => panic!("Expected invalid configuration, got {other:?}"),
        }
    }

    #[test]
    fn check_reports_violations_of_code_built_config() {
        let config = RobotConfig {
            max_speed: 0,
            ..RobotConfig::default()
        };
        match config.check() {
            Err(ConfigError::Invalid(violations)) => {
                assert_eq!(violations, vec![ConfigViolation::MaxSpeed(0)]);
            }
            other => panic!("Expected invalid configuration, got {other:?}"),
        }
        assert!(RobotConfig::default().check().is_ok());
    }

    #[test]
    fn config_serializes_correctly() {
        let config = RobotConfig {
            max_speed: 300,
            ..RobotConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RobotConfig::from_json(&json).unwrap(), config);
    }
}
