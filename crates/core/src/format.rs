//! Response payloads handed to the presentation layer.
//!
//! The formatter computes nothing new. It reshapes calculator and sampler
//! results into serializable structures and refuses to emit anything that
//! violates the output contract: every number finite, grids square, one
//! conservation entry per allele.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::base::{Allele, AlleleCount, AlleleFrequencies, Genotype};
use crate::equilibrium::{AlleleReconstruction, ConservationCheck, GenotypeFrequencies};
use crate::errors::{FormattingError, HardyError};
use crate::normalize::NormalizationResult;
use crate::sampling::{CurvePoint, CurveSample, GridSample, TernaryPoint, ValueRange};

/// The allele frequencies actually used, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputEcho {
    pub p: f64,
    pub q: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextGeneration {
    pub value: f64,
    pub formula: String,
    pub substitution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConservationPayload {
    pub p_next: NextGeneration,
    pub q_next: NextGeneration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_next: Option<NextGeneration>,
}

/// Single-point computation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenotypeResponse {
    pub input: InputEcho,
    pub alleles: usize,
    /// Whether the submitted frequencies had to be corrected
    pub normalized: bool,
    pub genotypes: BTreeMap<String, f64>,
    pub verbose_genotypes: BTreeMap<String, String>,
    pub conservation: ConservationPayload,
}

/// Surface and ternary data for one genotype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridResponse {
    pub genotype: Genotype,
    pub p_vals: Vec<f64>,
    pub q_vals: Vec<f64>,
    pub z_matrix: Vec<Vec<Option<f64>>>,
    pub points: Vec<TernaryPoint>,
    pub range: ValueRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveResponse {
    pub genotype: Genotype,
    pub points: Vec<CurvePoint>,
    pub range: ValueRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&HardyError> for ErrorResponse {
    fn from(err: &HardyError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

fn ensure_finite(field: impl Into<String>, value: f64) -> Result<f64, FormattingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormattingError::NonFinite {
            field: field.into(),
            value,
        })
    }
}

fn ensure_len(what: &'static str, expected: usize, found: usize) -> Result<(), FormattingError> {
    if expected == found {
        Ok(())
    } else {
        Err(FormattingError::ShapeMismatch {
            what,
            expected,
            found,
        })
    }
}

/// Human-readable derivation of one genotype frequency, e.g.
/// `2pq = 2 * 0.600 * 0.400 = 0.480000`.
pub fn describe_genotype(genotype: Genotype, freqs: &AlleleFrequencies, value: f64) -> String {
    let expression = genotype.expression();
    let x = freqs.get(genotype.first());
    if genotype.is_homozygote() {
        format!("{expression} = {x:.3}² = {value:.6}")
    } else {
        let y = freqs.get(genotype.second());
        format!("{expression} = 2 * {x:.3} * {y:.3} = {value:.6}")
    }
}

fn next_generation(
    allele: Allele,
    conservation: &ConservationCheck,
) -> Result<NextGeneration, FormattingError> {
    let AlleleReconstruction {
        value,
        formula,
        substitution,
        ..
    } = conservation
        .get(allele)
        .ok_or(FormattingError::ShapeMismatch {
            what: "conservation check",
            expected: allele.to_index() + 1,
            found: conservation.len(),
        })?;
    Ok(NextGeneration {
        value: ensure_finite(format!("{}_next", allele.symbol()), *value)?,
        formula: formula.clone(),
        substitution: substitution.clone(),
    })
}

/// Build the single-point response.
pub fn format_genotypes(
    result: &NormalizationResult,
    genotypes: &GenotypeFrequencies,
    conservation: &ConservationCheck,
) -> Result<GenotypeResponse, FormattingError> {
    let freqs = &result.frequencies;
    let count = freqs.count();
    ensure_len("genotype frequencies", count.genotype_count(), genotypes.len())?;
    ensure_len("conservation check", count.get(), conservation.len())?;

    let input = InputEcho {
        p: ensure_finite("input.p", freqs.p())?,
        q: ensure_finite("input.q", freqs.q())?,
        r: ensure_finite("input.r", freqs.r())?,
    };

    let mut numeric = BTreeMap::new();
    let mut verbose = BTreeMap::new();
    for (genotype, value) in genotypes.iter() {
        let label = genotype.to_string();
        let value = ensure_finite(format!("genotypes.{label}"), value)?;
        verbose.insert(label.clone(), describe_genotype(genotype, freqs, value));
        numeric.insert(label, value);
    }

    let conservation = ConservationPayload {
        p_next: next_generation(Allele::A, conservation)?,
        q_next: next_generation(Allele::B, conservation)?,
        r_next: match count {
            AlleleCount::Three => Some(next_generation(Allele::C, conservation)?),
            AlleleCount::Two => None,
        },
    };

    Ok(GenotypeResponse {
        input,
        alleles: count.get(),
        normalized: result.was_normalized,
        genotypes: numeric,
        verbose_genotypes: verbose,
        conservation,
    })
}

/// Build the surface/ternary response for one genotype.
pub fn format_grid(sample: &GridSample) -> Result<GridResponse, FormattingError> {
    let n = sample.resolution();
    ensure_len("q axis", n, sample.q_values().len())?;
    ensure_len("z matrix rows", n, sample.z_matrix().len())?;
    for row in sample.z_matrix() {
        ensure_len("z matrix row", n, row.len())?;
        for value in row.iter().flatten() {
            ensure_finite("z_matrix", *value)?;
        }
    }
    for (axis, values) in [("p_vals", sample.p_values()), ("q_vals", sample.q_values())] {
        for &value in values {
            ensure_finite(axis, value)?;
        }
    }
    for pt in sample.points() {
        for (field, value) in [("p", pt.p), ("q", pt.q), ("r", pt.r), ("freq", pt.freq)] {
            ensure_finite(format!("points.{field}"), value)?;
        }
    }
    let range = sample.range();
    ensure_finite("range.min", range.min)?;
    ensure_finite("range.max", range.max)?;

    Ok(GridResponse {
        genotype: sample.genotype(),
        p_vals: sample.p_values().to_vec(),
        q_vals: sample.q_values().to_vec(),
        z_matrix: sample.z_matrix().to_vec(),
        points: sample.points().to_vec(),
        range,
    })
}

pub fn format_curve(sample: &CurveSample) -> Result<CurveResponse, FormattingError> {
    for pt in sample.points() {
        for (field, value) in [("p", pt.p), ("q", pt.q), ("freq", pt.freq)] {
            ensure_finite(format!("points.{field}"), value)?;
        }
    }
    Ok(CurveResponse {
        genotype: sample.genotype(),
        points: sample.points().to_vec(),
        range: sample.range(),
    })
}

/// Ternary points as CSV with a `p,q,r,freq` header.
pub fn points_csv(points: &[TernaryPoint]) -> String {
    let mut csv = String::from("p,q,r,freq\n");
    for pt in points {
        csv.push_str(&format!("{},{},{},{}\n", pt.p, pt.q, pt.r, pt.freq));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equilibrium::{conservation_check, genotype_frequencies};
    use crate::normalize::normalize;
    use crate::sampling::{sample_grid, Resolution};

    fn respond(raw: &[f64], count: AlleleCount) -> GenotypeResponse {
        let result = normalize(raw, count).unwrap();
        let genotypes = genotype_frequencies(&result.frequencies);
        let conservation = conservation_check(&result.frequencies, &genotypes);
        format_genotypes(&result, &genotypes, &conservation).unwrap()
    }

    #[test]
    fn test_two_allele_response() {
        let response = respond(&[0.6, 0.4], AlleleCount::Two);
        assert_eq!(response.alleles, 2);
        assert!(!response.normalized);
        assert_eq!(
            response.genotypes.keys().collect::<Vec<_>>(),
            ["AA", "AB", "BB"]
        );
        assert_eq!(response.verbose_genotypes["AA"], "p² = 0.600² = 0.360000");
        assert_eq!(
            response.verbose_genotypes["AB"],
            "2pq = 2 * 0.600 * 0.400 = 0.480000"
        );
        assert!(response.conservation.r_next.is_none());
        assert!((response.conservation.p_next.value - 0.6).abs() < 1e-12);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["conservation"].get("r_next").is_none());
        assert_eq!(json["input"]["r"], 0.0);
    }

    #[test]
    fn test_three_allele_response() {
        let response = respond(&[5.0, 3.0, 2.0], AlleleCount::Three);
        assert!(response.normalized);
        assert_eq!(response.genotypes.len(), 6);
        assert!((response.input.p - 0.5).abs() < 1e-12);
        let r_next = response.conservation.r_next.as_ref().unwrap();
        assert_eq!(r_next.formula, "r' = r² + ½(2pr) + ½(2qr)");
        assert_eq!(
            response.verbose_genotypes["BC"],
            "2qr = 2 * 0.300 * 0.200 = 0.120000"
        );
    }

    #[test]
    fn test_rejects_mismatched_conservation() {
        let three = normalize(&[0.5, 0.3, 0.2], AlleleCount::Three).unwrap();
        let two = normalize(&[0.5, 0.5], AlleleCount::Two).unwrap();
        let genotypes = genotype_frequencies(&three.frequencies);
        let conservation = conservation_check(&two.frequencies, &genotype_frequencies(&two.frequencies));

        let err = format_genotypes(&three, &genotypes, &conservation).unwrap_err();
        assert_eq!(
            err,
            FormattingError::ShapeMismatch {
                what: "conservation check",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_grid_response_serializes_nulls() {
        let sample = sample_grid("AA".parse().unwrap(), Resolution::new(4), AlleleCount::Three).unwrap();
        let response = format_grid(&sample).unwrap();
        assert_eq!(response.p_vals.len(), 4);
        assert_eq!(response.z_matrix.len(), 4);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["genotype"], "AA");
        assert!(json["z_matrix"][3][3].is_null());
        assert_eq!(json["z_matrix"][0][3], 1.0);
        assert_eq!(json["points"].as_array().unwrap().len(), 10);
        assert_eq!(json["range"]["max"], 1.0);
    }

    #[test]
    fn test_points_csv() {
        let points = [
            TernaryPoint {
                p: 0.0,
                q: 0.0,
                r: 1.0,
                freq: 0.0,
            },
            TernaryPoint {
                p: 0.5,
                q: 0.25,
                r: 0.25,
                freq: 0.25,
            },
        ];
        assert_eq!(points_csv(&points), "p,q,r,freq\n0,0,1,0\n0.5,0.25,0.25,0.25\n");
        assert_eq!(points_csv(&[]), "p,q,r,freq\n");
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 0.5), Ok(0.5));
        assert_eq!(
            ensure_finite("x", f64::INFINITY),
            Err(FormattingError::NonFinite {
                field: "x".to_string(),
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_error_response() {
        let err = HardyError::from(crate::errors::GenotypeError::Unrecognized("ZZ".into()));
        let body = ErrorResponse::from(&err);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Invalid genotype 'ZZ'"}"#
        );
    }
}
