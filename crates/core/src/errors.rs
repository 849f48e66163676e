//! Error types for the Hardy-Weinberg core.
//!
//! Each stage owns its own error enum. [`HardyError`] unifies them for the
//! request layer, and [`ErrorKind`] groups them into the three categories a
//! caller has to distinguish.

use thiserror::Error;

use crate::base::{Allele, AlleleCount, Genotype};

/// Failures of the simplex normalizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizationError {
    /// Only two- and three-allele loci are modelled.
    #[error("Unsupported allele count: {0} (must be 2 or 3)")]
    UnsupportedAlleleCount(usize),

    /// A component was NaN or infinite.
    #[error("Frequency of allele {allele} is not a finite number: {value}")]
    NonFinite { allele: Allele, value: f64 },

    /// The raw components sum to zero or less.
    #[error("Sum of allele frequencies must be positive (sum = {sum})")]
    NoPositiveFrequency { sum: f64 },
}

/// Failures when naming a genotype.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenotypeError {
    #[error("Invalid genotype '{0}'")]
    Unrecognized(String),

    #[error("Genotype {genotype} is not defined for a {count}-allele locus")]
    NotInLocus {
        genotype: Genotype,
        count: AlleleCount,
    },
}

/// Failures of the grid sampler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error(transparent)]
    Genotype(#[from] GenotypeError),

    #[error("Resolution {requested} exceeds the maximum of {max}")]
    ResolutionTooLarge { requested: usize, max: usize },

    /// The lattice contains no point of the simplex, so no value range exists.
    #[error("No valid simplex points for genotype {genotype} at resolution {resolution}")]
    NoValidPoints {
        genotype: Genotype,
        resolution: usize,
    },
}

/// Internal invariant violations caught at the output boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormattingError {
    #[error("Non-finite value in field '{field}': {value}")]
    NonFinite { field: String, value: f64 },

    #[error("Malformed {what}: expected {expected} entries, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Genotype frequencies do not conserve allele frequencies (deviation {deviation:e})")]
    NotConserved { deviation: f64 },
}

/// Errors loading or validating a [`SamplingConfig`](crate::config::SamplingConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid sampling configuration: {0}")]
    Invalid(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Coarse classification used when reporting errors to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NoValidPoints,
    Formatting,
}

/// Any error the core can return to the request layer.
#[derive(Debug, Error)]
pub enum HardyError {
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Genotype(#[from] GenotypeError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Formatting(#[from] FormattingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HardyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Sampling(SamplingError::NoValidPoints { .. }) => ErrorKind::NoValidPoints,
            Self::Formatting(_) => ErrorKind::Formatting,
            Self::Normalization(_) | Self::Genotype(_) | Self::Sampling(_) | Self::Config(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}
