//! Two-allele genotype curves.
//!
//! With two alleles the simplex is the segment `q = 1 - p`, so a genotype's
//! equilibrium frequency is a function of `p` alone. This is the same set of
//! values as the anti-diagonal of a two-allele [`sample_grid`](super::sample_grid)
//! lattice, without the `n² - n` empty cells.

use serde::Serialize;

use super::{linspace, Resolution, ValueRange};
use crate::base::{AlleleCount, Genotype};
use crate::errors::{GenotypeError, SamplingError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub p: f64,
    pub q: f64,
    pub freq: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurveSample {
    genotype: Genotype,
    points: Vec<CurvePoint>,
    range: ValueRange,
}

impl CurveSample {
    pub fn genotype(&self) -> Genotype {
        self.genotype
    }

    /// Points in increasing `p`.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }
}

/// Evaluate a two-allele genotype at `n` evenly spaced values of `p`.
pub fn sample_curve(genotype: Genotype, resolution: Resolution) -> Result<CurveSample, SamplingError> {
    if !genotype.belongs_to(AlleleCount::Two) {
        return Err(GenotypeError::NotInLocus {
            genotype,
            count: AlleleCount::Two,
        }
        .into());
    }

    let axis = linspace(resolution.get());
    let points: Vec<CurvePoint> = axis
        .iter()
        .zip(axis.iter().rev())
        .map(|(&p, &q)| CurvePoint {
            p,
            q,
            freq: genotype.evaluate(&[p, q, 0.0]),
        })
        .collect();

    let range = ValueRange::over(points.iter().map(|pt| pt.freq)).ok_or(
        SamplingError::NoValidPoints {
            genotype,
            resolution: resolution.get(),
        },
    )?;

    Ok(CurveSample {
        genotype,
        points,
        range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::sample_grid;

    fn g(label: &str) -> Genotype {
        label.parse().unwrap()
    }

    #[test]
    fn test_heterozygote_curve() {
        let curve = sample_curve(g("AB"), Resolution::new(5)).unwrap();
        let freqs: Vec<f64> = curve.points().iter().map(|pt| pt.freq).collect();
        assert_eq!(freqs, vec![0.0, 0.375, 0.5, 0.375, 0.0]);
        assert_eq!(curve.range(), ValueRange { min: 0.0, max: 0.5 });
    }

    #[test]
    fn test_q_mirrors_p() {
        let curve = sample_curve(g("BB"), Resolution::new(9)).unwrap();
        for pt in curve.points() {
            assert!((pt.p + pt.q - 1.0).abs() < 1e-12);
            assert!((pt.freq - pt.q * pt.q).abs() < 1e-12);
        }
    }

    #[test]
    fn test_matches_grid_diagonal() {
        let n = 11;
        let curve = sample_curve(g("AA"), Resolution::new(n)).unwrap();
        let grid = sample_grid(g("AA"), Resolution::new(n), AlleleCount::Two).unwrap();
        for (i, pt) in curve.points().iter().enumerate() {
            assert_eq!(grid.cell(i, n - 1 - i), Some(pt.freq));
        }
    }

    #[test]
    fn test_rejects_third_allele() {
        assert!(sample_curve(g("CC"), Resolution::default()).is_err());
    }
}
