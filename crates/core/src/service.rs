//! Request operations.
//!
//! Each function takes already-parsed request parameters, runs the pipeline
//! (normalizer, calculator, sampler, formatter) and returns a response body.
//! [`respond`] turns any outcome into the JSON document a client receives,
//! mapping errors to `{"error": message}`.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::base::{AlleleCount, Genotype};
use crate::config::SamplingConfig;
use crate::equilibrium::{conservation_check, genotype_frequencies};
use crate::errors::{FormattingError, HardyError};
use crate::format::{
    format_curve, format_genotypes, format_grid, points_csv, CurveResponse, GenotypeResponse,
    GridResponse,
};
use crate::normalize::normalize;
use crate::sampling::{sample_curve, sample_grid, GridSample};

/// Genotype frequencies and conservation check for one set of allele
/// frequencies. For two alleles only `p` and `q` are read from `raw`.
pub fn compute_genotypes(
    raw: &[f64],
    count: AlleleCount,
    config: &SamplingConfig,
) -> Result<GenotypeResponse, HardyError> {
    let result = normalize(raw, count)?;
    let genotypes = genotype_frequencies(&result.frequencies);
    let conservation = conservation_check(&result.frequencies, &genotypes);

    let deviation = conservation.max_deviation(&result.frequencies);
    if deviation > config.tolerance {
        return Err(FormattingError::NotConserved { deviation }.into());
    }
    debug!(
        alleles = count.get(),
        normalized = result.was_normalized,
        deviation,
        "computed genotype frequencies"
    );

    Ok(format_genotypes(&result, &genotypes, &conservation)?)
}

fn sample(
    genotype: &str,
    resolution: Option<i64>,
    count: AlleleCount,
    config: &SamplingConfig,
) -> Result<GridSample, HardyError> {
    let genotype: Genotype = genotype.parse()?;
    let resolution = config.resolve(resolution)?;
    Ok(sample_grid(genotype, resolution, count)?)
}

/// Surface and ternary data for one genotype.
pub fn grid(
    genotype: &str,
    resolution: Option<i64>,
    count: AlleleCount,
    config: &SamplingConfig,
) -> Result<GridResponse, HardyError> {
    let sample = sample(genotype, resolution, count, config)?;
    Ok(format_grid(&sample)?)
}

/// Valid grid points of one genotype as CSV.
pub fn grid_csv(
    genotype: &str,
    resolution: Option<i64>,
    count: AlleleCount,
    config: &SamplingConfig,
) -> Result<String, HardyError> {
    let sample = sample(genotype, resolution, count, config)?;
    Ok(points_csv(sample.points()))
}

/// One-dimensional curve of a two-allele genotype.
pub fn curve(
    genotype: &str,
    resolution: Option<i64>,
    config: &SamplingConfig,
) -> Result<CurveResponse, HardyError> {
    let genotype: Genotype = genotype.parse()?;
    let resolution = config.resolve(resolution)?;
    let sample = sample_curve(genotype, resolution)?;
    Ok(format_curve(&sample)?)
}

/// JSON body for an outcome: the response itself, or `{"error": message}`.
pub fn respond<T: Serialize>(outcome: &Result<T, HardyError>) -> Value {
    let error = |message: String| serde_json::json!({ "error": message });
    match outcome {
        Ok(body) => serde_json::to_value(body).unwrap_or_else(|e| error(e.to_string())),
        Err(err) => {
            warn!(kind = ?err.kind(), "{err}");
            error(err.to_string())
        }
    }
}
