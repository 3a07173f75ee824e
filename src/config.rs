//! Configuration.
//!
//! Every knob has a default matching the behaviour the verification harness
//! was calibrated against; configs are plain serde structs so a harness can
//! load them from JSON next to its schema.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GeneraliseError, GeneraliseResult};

/// Default divisor applied to a value's magnitude when widening a range.
pub const DEFAULT_WIDENING_FACTOR: f64 = 2.0;

/// Default magnitude used in place of a zero value or a zero-width range.
pub const DEFAULT_ZERO_WIDTH: f64 = 1.0;

/// Default bound on fixed-point iteration rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 64;

/// Default capacity of the channel used by parallel fan-out.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Attribute generalisation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneraliseConfig {
    /// Divisor `k` applied to a magnitude: a bound `v` moves by `|v| / k`.
    pub widening_factor: f64,
    /// Magnitude used when the value (or range width) is zero.
    pub zero_width: f64,
}

impl Default for GeneraliseConfig {
    fn default() -> Self {
        Self {
            widening_factor: DEFAULT_WIDENING_FACTOR,
            zero_width: DEFAULT_ZERO_WIDTH,
        }
    }
}

impl GeneraliseConfig {
    /// Validates this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.widening_factor.is_finite() || self.widening_factor <= 0.0 {
            return Err(ConfigError::InvalidWideningFactor {
                value: self.widening_factor,
            });
        }
        if !self.zero_width.is_finite() || self.zero_width <= 0.0 {
            return Err(ConfigError::InvalidZeroWidth {
                value: self.zero_width,
            });
        }
        Ok(())
    }
}

/// Driver configuration for iterated and parallel application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Maximum number of rounds before [`converge`](crate::driver::converge)
    /// gives up.
    pub max_rounds: usize,
    /// Capacity of the bounded channel between parallel operator workers and
    /// the collector.
    pub channel_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl DriverConfig {
    /// Validates this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds < 1 {
            return Err(ConfigError::TooSmall {
                field: "max_rounds".to_string(),
                min: 1,
            });
        }
        if self.channel_capacity < 1 {
            return Err(ConfigError::TooSmall {
                field: "channel_capacity".to_string(),
                min: 1,
            });
        }
        Ok(())
    }
}

/// Deserialize and validate a config from JSON.
pub fn from_json<T>(s: &str) -> GeneraliseResult<T>
where
    T: for<'de> Deserialize<'de> + Validate,
{
    let config: T = serde_json::from_str(s)
        .map_err(|e| GeneraliseError::internal(format!("deserialize config: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Configs that can check their own invariants.
pub trait Validate {
    /// Validates the config.
    fn validate(&self) -> Result<(), ConfigError>;
}

impl Validate for GeneraliseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        GeneraliseConfig::validate(self)
    }
}

impl Validate for DriverConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        DriverConfig::validate(self)
    }
}
