use anyhow::Result;
use hardy_core::config::SamplingConfig;
use hardy_core::service::curve;
use std::path::PathBuf;

use crate::utils::emit_json;

/// Frequency of a two-allele genotype along `p + q = 1`.
pub fn sample_curve(
    genotype: &str,
    resolution: Option<i64>,
    output: Option<&PathBuf>,
    config: &SamplingConfig,
) -> Result<()> {
    emit_json(curve(genotype, resolution, config), output)
}
