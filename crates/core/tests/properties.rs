//! Property tests for the simplex normalizer, the Hardy-Weinberg calculator
//! and the grid sampler.

use hardy_core::equilibrium::{conservation_check, genotype_frequencies};
use hardy_core::normalize::normalize;
use hardy_core::sampling::{sample_grid, Resolution};
use hardy_core::{AlleleCount, Genotype};
use proptest::prelude::*;

const TOL: f64 = 1e-8;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_count() -> impl Strategy<Value = AlleleCount> {
    prop_oneof![Just(AlleleCount::Two), Just(AlleleCount::Three)]
}

/// Raw input with mixed signs whose sum is positive for either allele count.
fn arb_raw() -> impl Strategy<Value = Vec<f64>> {
    (
        prop::collection::vec(-10.0f64..10.0, 3),
        0usize..2,
        0.001f64..10.0,
    )
        .prop_map(|(mut raw, idx, margin)| {
            // Outweigh every other component, negative or not
            let others: f64 = (0..3).filter(|&i| i != idx).map(|i| raw[i].abs()).sum();
            raw[idx] = others + margin;
            raw
        })
}

/// Raw input with a positive component but a raw sum of zero or less.
fn arb_non_positive_sum() -> impl Strategy<Value = Vec<f64>> {
    (0.001f64..10.0, 0.0f64..10.0, -10.0f64..=0.0)
        .prop_map(|(a, deficit, c)| vec![a, -(a + deficit), c])
}

fn arb_genotype(count: AlleleCount) -> impl Strategy<Value = Genotype> {
    prop::sample::select(Genotype::all(count))
}

fn arb_grid_request() -> impl Strategy<Value = (AlleleCount, Genotype, usize)> {
    arb_count().prop_flat_map(|count| (Just(count), arb_genotype(count), 0usize..40))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in arb_raw(), count in arb_count()) {
        let once = normalize(&raw, count).unwrap();
        let twice = normalize(once.frequencies.as_slice(), count).unwrap();
        prop_assert_eq!(once.frequencies, twice.frequencies);
        prop_assert!(!twice.was_normalized);
    }

    #[test]
    fn normalized_values_lie_on_simplex(raw in arb_raw(), count in arb_count()) {
        let freqs = normalize(&raw, count).unwrap().frequencies;
        prop_assert!((freqs.sum() - 1.0).abs() <= TOL);
        prop_assert!(freqs.as_array().iter().all(|&v| v >= 0.0));
        if count == AlleleCount::Two {
            prop_assert_eq!(freqs.r(), 0.0);
        }
    }

    #[test]
    fn non_positive_input_is_rejected(
        raw in prop::collection::vec(-10.0f64..=0.0, 3),
        count in arb_count(),
    ) {
        prop_assert!(normalize(&raw, count).is_err());
    }

    #[test]
    fn mixed_signs_with_non_positive_sum_are_rejected(
        raw in arb_non_positive_sum(),
        count in arb_count(),
    ) {
        prop_assert!(normalize(&raw, count).is_err());
    }

    #[test]
    fn genotype_frequencies_sum_to_one(raw in arb_raw(), count in arb_count()) {
        let freqs = normalize(&raw, count).unwrap().frequencies;
        let genotypes = genotype_frequencies(&freqs);
        prop_assert_eq!(genotypes.len(), count.genotype_count());
        prop_assert!((genotypes.total() - 1.0).abs() <= 3.0 * TOL);
        prop_assert!(genotypes.iter().all(|(_, f)| (0.0..=1.0 + TOL).contains(&f)));
    }

    #[test]
    fn conservation_round_trip(raw in arb_raw(), count in arb_count()) {
        let freqs = normalize(&raw, count).unwrap().frequencies;
        let check = conservation_check(&freqs, &genotype_frequencies(&freqs));
        prop_assert_eq!(check.len(), count.get());
        for rec in check.iter() {
            prop_assert!((rec.value - freqs.get(rec.allele)).abs() <= TOL);
        }
    }

    #[test]
    fn grid_shape_is_square((count, genotype, n) in arb_grid_request()) {
        let grid = sample_grid(genotype, Resolution::new(n), count).unwrap();
        let expected = n.max(2);
        prop_assert_eq!(grid.p_values().len(), expected);
        prop_assert_eq!(grid.q_values().len(), expected);
        prop_assert_eq!(grid.z_matrix().len(), expected);
        prop_assert!(grid.z_matrix().iter().all(|row| row.len() == expected));

        let filled = grid.z_matrix().iter().flatten().filter(|c| c.is_some()).count();
        prop_assert_eq!(filled, grid.points().len());
        let expected_points = match count {
            AlleleCount::Three => expected * (expected + 1) / 2,
            AlleleCount::Two => expected,
        };
        prop_assert_eq!(grid.points().len(), expected_points);
    }

    #[test]
    fn grid_points_match_pointwise_evaluation((count, genotype, n) in arb_grid_request()) {
        let grid = sample_grid(genotype, Resolution::new(n), count).unwrap();
        let range = grid.range();
        for pt in grid.points() {
            prop_assert!(pt.r >= 0.0 && pt.r <= 1.0);
            prop_assert!((pt.p + pt.q + pt.r - 1.0).abs() <= TOL);
            prop_assert_eq!(pt.freq, genotype.evaluate(&[pt.p, pt.q, pt.r]));
            prop_assert!(range.min <= pt.freq && pt.freq <= range.max);
        }
    }
}
