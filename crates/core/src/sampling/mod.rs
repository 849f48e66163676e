//! Sampling genotype frequencies over the allele-frequency simplex.
//!
//! - [`grid`]: a square `(p, q)` lattice for surface plots, plus the valid
//!   points as barycentric triples for ternary plots.
//! - [`curve`]: the one-dimensional `q = 1 - p` path of a two-allele locus.

pub mod curve;
pub mod grid;

use serde::Serialize;

pub use curve::{sample_curve, CurvePoint, CurveSample};
pub use grid::{sample_grid, GridSample, TernaryPoint};

/// Number of divisions per axis, never below [`Resolution::MIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Resolution(usize);

impl Resolution {
    pub const DEFAULT: usize = 60;
    pub const MIN: usize = 2;

    /// Values below [`Resolution::MIN`] are raised to it.
    pub fn new(divisions: usize) -> Self {
        Self(divisions.max(Self::MIN))
    }

    /// Interpret a parsed request value: absent or non-positive means default.
    pub fn from_request(raw: Option<i64>) -> Self {
        match raw {
            Some(n) if n > 0 => Self::new(usize::try_from(n).unwrap_or(usize::MAX)),
            _ => Self::default(),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Minimum and maximum of the valid sampled values, for colour scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range of `values`, or `None` when there are none.
    pub fn over<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |range, v| {
            Some(match range {
                None => Self { min: v, max: v },
                Some(Self { min, max }) => Self {
                    min: min.min(v),
                    max: max.max(v),
                },
            })
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// `n` evenly spaced values from 0 to 1 inclusive. Requires `n >= 2`.
pub(crate) fn linspace(n: usize) -> Vec<f64> {
    let last = (n - 1) as f64;
    (0..n).map(|i| i as f64 / last).collect()
}
