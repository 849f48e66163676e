//! Simplex normalization of user-supplied allele frequencies.
//!
//! Validation happens in two tiers. [`normalize`] enforces the only hard
//! precondition (the raw frequencies must have a positive sum) and projects the
//! input onto the simplex. [`range_advisories`] reports components that look
//! wrong to a human but never fails; presenting those is left to the caller.

use core::fmt;

use tracing::debug;

use crate::base::{Allele, AlleleCount, AlleleFrequencies};
use crate::errors::NormalizationError;

/// Tolerance on `|sum - 1|` below which input is passed through unchanged.
pub const SIMPLEX_TOLERANCE: f64 = 1e-8;

/// Deviation of the raw sum from 1 worth warning a user about.
pub const SUM_ADVISORY_THRESHOLD: f64 = 0.01;

/// Outcome of a successful normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationResult {
    pub frequencies: AlleleFrequencies,
    /// True if any component was changed to reach the simplex.
    pub was_normalized: bool,
}

/// Project raw allele frequencies onto the probability simplex.
///
/// Components beyond the end of `raw` count as 0, and for a two-allele locus
/// the third component is ignored. The raw components must have a positive
/// sum. Negative components are then set to 0 and the vector is rescaled by
/// its sum when that sum differs from 1 by more than [`SIMPLEX_TOLERANCE`].
///
/// # Errors
///
/// * [`NormalizationError::NonFinite`] if a component is NaN or infinite.
/// * [`NormalizationError::NoPositiveFrequency`] if the raw sum is not positive.
///
/// # Examples
///
/// ```
/// use hardy_core::normalize::normalize;
/// use hardy_core::AlleleCount;
///
/// let result = normalize(&[2.0, 2.0], AlleleCount::Two).unwrap();
/// assert_eq!(result.frequencies.as_slice(), &[0.5, 0.5]);
/// assert!(result.was_normalized);
/// ```
pub fn normalize(
    raw: &[f64],
    count: AlleleCount,
) -> Result<NormalizationResult, NormalizationError> {
    let mut values = [0.0; 3];
    let mut raw_sum = 0.0;
    let mut projected = false;

    for &allele in count.alleles() {
        let value = raw.get(allele.to_index()).copied().unwrap_or(0.0);
        if !value.is_finite() {
            return Err(NormalizationError::NonFinite { allele, value });
        }
        raw_sum += value;
        if value < 0.0 {
            projected = true;
        } else {
            values[allele.to_index()] = value;
        }
    }

    if raw_sum <= 0.0 {
        return Err(NormalizationError::NoPositiveFrequency { sum: raw_sum });
    }

    // Dropping negatives only raises the sum, so it stays positive.
    let mut sum: f64 = values.iter().sum();
    if sum.is_infinite() {
        // Finite components can still overflow when added.
        let peak = values.iter().copied().fold(0.0, f64::max);
        values.iter_mut().for_each(|v| *v /= peak);
        sum = values.iter().sum();
    }

    let rescaled = (sum - 1.0).abs() > SIMPLEX_TOLERANCE;
    if rescaled {
        values.iter_mut().for_each(|v| *v /= sum);
    }

    let was_normalized = rescaled || projected;
    if was_normalized {
        debug!(
            raw = ?&raw[..raw.len().min(count.get())],
            normalized = ?&values[..count.get()],
            "allele frequencies projected onto the simplex"
        );
    }

    Ok(NormalizationResult {
        frequencies: AlleleFrequencies::from_simplex(values, count),
        was_normalized,
    })
}

/// A soft warning about raw input. Never blocks a computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeAdvisory {
    /// A single component lies outside [0, 1].
    OutOfRange { allele: Allele, value: f64 },
    /// The raw components sum to something noticeably different from 1.
    SumDeviation { sum: f64 },
}

impl fmt::Display for RangeAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { allele, value } => write!(
                f,
                "frequency of allele {allele} ({}) = {value} is outside [0, 1]",
                allele.symbol()
            ),
            Self::SumDeviation { sum } => write!(
                f,
                "allele frequencies sum to {sum:.3} (should be close to 1); values will be normalized"
            ),
        }
    }
}

/// Collect advisories for raw input, in allele order, sum check last.
///
/// Non-finite components are skipped here; [`normalize`] rejects them.
pub fn range_advisories(raw: &[f64], count: AlleleCount) -> Vec<RangeAdvisory> {
    let mut advisories = Vec::new();
    let mut sum = 0.0;
    let mut all_finite = true;

    for &allele in count.alleles() {
        let value = raw.get(allele.to_index()).copied().unwrap_or(0.0);
        if !value.is_finite() {
            all_finite = false;
            continue;
        }
        sum += value;
        if !(0.0..=1.0).contains(&value) {
            advisories.push(RangeAdvisory::OutOfRange { allele, value });
        }
    }

    if all_finite && (sum - 1.0).abs() > SUM_ADVISORY_THRESHOLD {
        advisories.push(RangeAdvisory::SumDeviation { sum });
    }
    advisories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_rescales_two_alleles() {
        let result = normalize(&[2.0, 2.0], AlleleCount::Two).unwrap();
        assert_eq!(result.frequencies.as_slice(), &[0.5, 0.5]);
        assert_eq!(result.frequencies.r(), 0.0);
        assert!(result.was_normalized);
    }

    #[test]
    fn test_passes_through_simplex_point() {
        let result = normalize(&[0.5, 0.3, 0.2], AlleleCount::Three).unwrap();
        assert_eq!(result.frequencies.as_array(), [0.5, 0.3, 0.2]);
        assert!(!result.was_normalized);
    }

    #[test]
    fn test_within_tolerance_is_untouched() {
        let result = normalize(&[0.6, 0.4 + 5e-9], AlleleCount::Two).unwrap();
        assert_eq!(result.frequencies.q(), 0.4 + 5e-9);
        assert!(!result.was_normalized);
    }

    #[test]
    fn test_two_allele_ignores_third_component() {
        let result = normalize(&[0.6, 0.4, 7.0], AlleleCount::Two).unwrap();
        assert_eq!(result.frequencies.as_array(), [0.6, 0.4, 0.0]);
        assert!(!result.was_normalized);
    }

    #[test]
    fn test_missing_components_are_zero() {
        let result = normalize(&[0.25], AlleleCount::Three).unwrap();
        assert_eq!(result.frequencies.as_array(), [1.0, 0.0, 0.0]);
        assert!(result.was_normalized);
    }

    #[test]
    fn test_negative_components_are_projected() {
        let result = normalize(&[1.5, -0.5], AlleleCount::Two).unwrap();
        assert_eq!(result.frequencies.as_slice(), &[1.0, 0.0]);
        assert!(result.was_normalized);

        let result = normalize(&[0.3, -0.1, 0.3], AlleleCount::Three).unwrap();
        assert!(approx_eq(result.frequencies.p(), 0.5));
        assert_eq!(result.frequencies.q(), 0.0);
        assert!(approx_eq(result.frequencies.r(), 0.5));
    }

    #[test]
    fn test_out_of_range_values_are_not_rejected() {
        let result = normalize(&[3.0, 1.0, 0.0], AlleleCount::Three).unwrap();
        assert!(approx_eq(result.frequencies.p(), 0.75));
        assert!(approx_eq(result.frequencies.q(), 0.25));
    }

    #[test]
    fn test_rejects_non_positive_sum() {
        assert_eq!(
            normalize(&[0.0, 0.0, 0.0], AlleleCount::Three),
            Err(NormalizationError::NoPositiveFrequency { sum: 0.0 })
        );
        assert_eq!(
            normalize(&[-1.0, -2.0], AlleleCount::Two),
            Err(NormalizationError::NoPositiveFrequency { sum: -3.0 })
        );
        assert!(normalize(&[], AlleleCount::Two).is_err());
    }

    #[test]
    fn test_rejects_mixed_signs_with_non_positive_sum() {
        assert_eq!(
            normalize(&[0.5, -0.5], AlleleCount::Two),
            Err(NormalizationError::NoPositiveFrequency { sum: 0.0 })
        );
        assert_eq!(
            normalize(&[0.2, 0.3, -1.0], AlleleCount::Three),
            Err(NormalizationError::NoPositiveFrequency { sum: -0.5 })
        );
        // Only the alleles of the locus count towards the sum.
        assert!(normalize(&[0.5, -0.5, 3.0], AlleleCount::Two).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = normalize(&[0.5, f64::NAN], AlleleCount::Two).unwrap_err();
        assert!(matches!(
            err,
            NormalizationError::NonFinite {
                allele: Allele::B,
                ..
            }
        ));
        assert!(normalize(&[f64::INFINITY, 0.0, 0.0], AlleleCount::Three).is_err());
    }

    #[test]
    fn test_huge_values_stay_on_simplex() {
        let result = normalize(&[f64::MAX, f64::MAX, f64::MAX], AlleleCount::Three).unwrap();
        for value in result.frequencies.as_slice() {
            assert!(approx_eq(*value, 1.0 / 3.0));
        }
    }

    #[test]
    fn test_idempotent() {
        let once = normalize(&[3.0, 1.0, 2.0], AlleleCount::Three).unwrap();
        let twice = normalize(once.frequencies.as_slice(), AlleleCount::Three).unwrap();
        assert_eq!(once.frequencies, twice.frequencies);
        assert!(!twice.was_normalized);
    }

    #[test]
    fn test_advisories() {
        assert!(range_advisories(&[0.5, 0.3, 0.2], AlleleCount::Three).is_empty());

        let advisories = range_advisories(&[1.5, -0.25], AlleleCount::Two);
        assert_eq!(
            advisories,
            vec![
                RangeAdvisory::OutOfRange {
                    allele: Allele::A,
                    value: 1.5
                },
                RangeAdvisory::OutOfRange {
                    allele: Allele::B,
                    value: -0.25
                },
                RangeAdvisory::SumDeviation { sum: 1.25 },
            ]
        );

        // Small drift is normalized silently
        assert!(range_advisories(&[0.6, 0.405], AlleleCount::Two).is_empty());
    }

    #[test]
    fn test_advisory_display() {
        let advisory = RangeAdvisory::OutOfRange {
            allele: Allele::C,
            value: 2.0,
        };
        assert_eq!(
            advisory.to_string(),
            "frequency of allele C (r) = 2 is outside [0, 1]"
        );
    }
}
