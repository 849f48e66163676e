//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use hardy_core::prelude::*;
//!
//! let result = normalize(&[2.0, 2.0], AlleleCount::Two).unwrap();
//! assert!(result.was_normalized);
//! assert_eq!(result.frequencies.p(), 0.5);
//! ```

pub use crate::base::{Allele, AlleleCount, AlleleFrequencies, Genotype};
pub use crate::config::SamplingConfig;
pub use crate::equilibrium::{
    conservation_check, genotype_frequencies, ConservationCheck, GenotypeFrequencies,
};
pub use crate::errors::{self, ErrorKind, HardyError};
pub use crate::normalize::{normalize, range_advisories, NormalizationResult, RangeAdvisory};
pub use crate::sampling::{sample_curve, sample_grid, GridSample, Resolution, TernaryPoint};
