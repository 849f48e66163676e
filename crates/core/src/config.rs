//! Sampling configuration.
//!
//! Can be deserialized from a JSON file so that a deployment can change the
//! default resolution or tighten the resolution cap without a rebuild. Missing
//! fields take their default values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, SamplingError};
use crate::normalize::SIMPLEX_TOLERANCE;
use crate::sampling::Resolution;

/// Limits applied by the request layer before sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// Resolution used when a request gives none (or a non-positive one)
    pub default_resolution: usize,
    /// Smaller requests are raised to this value
    pub min_resolution: usize,
    /// Larger requests are rejected; bounds the `n²` sampling work
    pub max_resolution: usize,
    /// Allowed conservation-law deviation before a result is refused
    pub tolerance: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            default_resolution: Resolution::DEFAULT,
            min_resolution: Resolution::MIN,
            max_resolution: 200,
            tolerance: SIMPLEX_TOLERANCE,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_resolution < Resolution::MIN {
            return Err(ConfigError::Invalid(format!(
                "min_resolution must be at least {}, got {}",
                Resolution::MIN,
                self.min_resolution
            )));
        }
        if self.min_resolution > self.max_resolution {
            return Err(ConfigError::Invalid(format!(
                "min_resolution ({}) exceeds max_resolution ({})",
                self.min_resolution, self.max_resolution
            )));
        }
        if !(self.min_resolution..=self.max_resolution).contains(&self.default_resolution) {
            return Err(ConfigError::Invalid(format!(
                "default_resolution ({}) must lie in [{}, {}]",
                self.default_resolution, self.min_resolution, self.max_resolution
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Turn a requested resolution into the one to sample at.
    ///
    /// Absent or non-positive requests use `default_resolution`; small ones are
    /// raised to `min_resolution`.
    ///
    /// # Errors
    ///
    /// [`SamplingError::ResolutionTooLarge`] above `max_resolution`.
    pub fn resolve(&self, requested: Option<i64>) -> Result<Resolution, SamplingError> {
        let divisions = match requested {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => self.default_resolution,
        };
        if divisions > self.max_resolution {
            return Err(SamplingError::ResolutionTooLarge {
                requested: divisions,
                max: self.max_resolution,
            });
        }
        Ok(Resolution::new(divisions.max(self.min_resolution)))
    }
}
