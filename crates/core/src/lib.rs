//! # Hardy-Weinberg core
//!
//! Numeric engine behind the `hardy` tool. It normalizes allele frequencies
//! onto the simplex, derives Hardy-Weinberg genotype frequencies, verifies the
//! conservation law, and samples genotype frequencies over the simplex for
//! surface and ternary plots.
//!
//! Every operation is a pure function over value types. Nothing here touches
//! I/O except [`config::SamplingConfig::from_file`].

pub mod base;
pub mod config;
pub mod equilibrium;
pub mod errors;
pub mod format;
pub mod normalize;
pub mod prelude;
pub mod sampling;
pub mod service;

pub use base::{Allele, AlleleCount, AlleleFrequencies, Genotype};
pub use errors::{ErrorKind, HardyError};
