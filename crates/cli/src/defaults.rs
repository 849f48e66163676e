//! Shared default values for command-line options.
//! Sampling limits themselves live in `SamplingConfig`; these only seed clap.

pub const ALLELES: u8 = 3;

pub const COMPUTE_FORMAT: &str = "pretty";
pub const GRID_FORMAT: &str = "json";

pub const CONFIG_ENV: &str = "HARDY_CONFIG";
