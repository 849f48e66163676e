//! Rectangular `(p, q)` lattice sampling.
//!
//! The lattice covers `[0, 1] × [0, 1]`, but only cells inside the simplex
//! carry a value. Cells outside stay in the matrix as `None` so that surface
//! renderers receive a full `n × n` grid.

use serde::Serialize;
use tracing::debug;

use super::{linspace, Resolution, ValueRange};
use crate::base::{AlleleCount, Genotype};
use crate::errors::{GenotypeError, SamplingError};

/// A valid simplex point and the genotype frequency there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TernaryPoint {
    pub p: f64,
    pub q: f64,
    pub r: f64,
    pub freq: f64,
}

/// Result of sampling one genotype over the lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSample {
    genotype: Genotype,
    count: AlleleCount,
    p_values: Vec<f64>,
    q_values: Vec<f64>,
    z_matrix: Vec<Vec<Option<f64>>>,
    points: Vec<TernaryPoint>,
    range: ValueRange,
}

impl GridSample {
    pub fn genotype(&self) -> Genotype {
        self.genotype
    }

    pub fn count(&self) -> AlleleCount {
        self.count
    }

    /// Number of lattice values per axis.
    pub fn resolution(&self) -> usize {
        self.p_values.len()
    }

    pub fn p_values(&self) -> &[f64] {
        &self.p_values
    }

    pub fn q_values(&self) -> &[f64] {
        &self.q_values
    }

    /// Row `j` holds the cells with `q = q_values[j]`; column `i` those with
    /// `p = p_values[i]`.
    pub fn z_matrix(&self) -> &[Vec<Option<f64>>] {
        &self.z_matrix
    }

    pub fn cell(&self, p_idx: usize, q_idx: usize) -> Option<f64> {
        self.z_matrix.get(q_idx)?.get(p_idx).copied().flatten()
    }

    /// Valid points, `p` varying slowest.
    pub fn points(&self) -> &[TernaryPoint] {
        &self.points
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }
}

/// Evaluate `genotype` on an `n × n` lattice over the simplex.
///
/// For lattice indices `i` (p axis) and `j` (q axis) the implied third
/// frequency is `r = 1 - p - q`. A three-allele cell is valid when
/// `i + j <= n - 1`, i.e. `r >= 0`; computing `r` from the indices keeps it
/// exact on the boundary. A two-allele locus has `r = 0`, so only the
/// anti-diagonal `q = 1 - p` is valid.
///
/// # Errors
///
/// * [`GenotypeError::NotInLocus`] if the genotype uses an allele the locus
///   does not have.
/// * [`SamplingError::NoValidPoints`] if no cell is valid.
///
/// # Examples
///
/// ```
/// use hardy_core::sampling::{sample_grid, Resolution};
/// use hardy_core::AlleleCount;
///
/// let grid = sample_grid("AA".parse().unwrap(), Resolution::new(4), AlleleCount::Three).unwrap();
/// assert_eq!(grid.z_matrix().len(), 4);
/// assert_eq!(grid.cell(3, 3), None); // p + q = 2
/// assert_eq!(grid.cell(3, 0), Some(1.0)); // p = 1
/// ```
pub fn sample_grid(
    genotype: Genotype,
    resolution: Resolution,
    count: AlleleCount,
) -> Result<GridSample, SamplingError> {
    if !genotype.belongs_to(count) {
        return Err(GenotypeError::NotInLocus { genotype, count }.into());
    }

    let n = resolution.get();
    let last = n - 1;
    let axis = linspace(n);
    let mut z_matrix = vec![vec![None; n]; n];
    let mut points = Vec::new();

    for (i, &p) in axis.iter().enumerate() {
        for (j, &q) in axis.iter().enumerate() {
            let Some(r) = implied_r(i, j, last, count) else {
                continue;
            };
            let freq = genotype.evaluate(&[p, q, r]);
            z_matrix[j][i] = Some(freq);
            points.push(TernaryPoint { p, q, r, freq });
        }
    }

    let range = ValueRange::over(points.iter().map(|pt| pt.freq)).ok_or(
        SamplingError::NoValidPoints {
            genotype,
            resolution: n,
        },
    )?;

    debug!(
        %genotype,
        alleles = count.get(),
        resolution = n,
        valid = points.len(),
        min = range.min,
        max = range.max,
        "sampled genotype grid"
    );

    Ok(GridSample {
        genotype,
        count,
        p_values: axis.clone(),
        q_values: axis,
        z_matrix,
        points,
        range,
    })
}

/// `r` for lattice cell `(i, j)`, or `None` outside the simplex.
fn implied_r(i: usize, j: usize, last: usize, count: AlleleCount) -> Option<f64> {
    match count {
        AlleleCount::Three => (i + j <= last).then(|| (last - i - j) as f64 / last as f64),
        AlleleCount::Two => (i + j == last).then_some(0.0),
    }
}
