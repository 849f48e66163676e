//! Hardy-Weinberg genotype frequencies and the conservation law.
//!
//! Under random mating, genotype frequencies follow the multinomial expansion
//! of `(p + q + r)²`. Recovering allele frequencies from those genotype
//! frequencies (each homozygote counts fully, each heterozygote by half)
//! returns the input unchanged, which is why the equilibrium is stable across
//! generations.

use crate::base::{Allele, AlleleCount, AlleleFrequencies, Genotype};

/// Genotype frequencies of one locus, in canonical genotype order.
#[derive(Debug, Clone, PartialEq)]
pub struct GenotypeFrequencies {
    count: AlleleCount,
    entries: Vec<(Genotype, f64)>,
}

impl GenotypeFrequencies {
    pub fn count(&self) -> AlleleCount {
        self.count
    }

    pub fn get(&self, genotype: Genotype) -> Option<f64> {
        self.entries
            .iter()
            .find(|(g, _)| *g == genotype)
            .map(|&(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Genotype, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all genotypes; 1 for any simplex input.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, f)| f).sum()
    }
}

/// Compute equilibrium genotype frequencies.
///
/// Two alleles give `p²`, `q²`, `2pq`; three alleles add `r²`, `2pr`, `2qr`.
///
/// # Examples
///
/// ```
/// use hardy_core::equilibrium::genotype_frequencies;
/// use hardy_core::normalize::normalize;
/// use hardy_core::{AlleleCount, Genotype};
///
/// let freqs = normalize(&[0.6, 0.4], AlleleCount::Two).unwrap().frequencies;
/// let genotypes = genotype_frequencies(&freqs);
/// let het: Genotype = "AB".parse().unwrap();
/// assert!((genotypes.get(het).unwrap() - 0.48).abs() < 1e-12);
/// ```
pub fn genotype_frequencies(freqs: &AlleleFrequencies) -> GenotypeFrequencies {
    let values = freqs.as_array();
    let entries = Genotype::all(freqs.count())
        .into_iter()
        .map(|genotype| (genotype, genotype.evaluate(&values)))
        .collect();
    GenotypeFrequencies {
        count: freqs.count(),
        entries,
    }
}

/// Next-generation frequency of one allele, with a readable trace.
#[derive(Debug, Clone, PartialEq)]
pub struct AlleleReconstruction {
    pub allele: Allele,
    pub value: f64,
    /// e.g. `p' = p² + ½(2pq) + ½(2pr)`
    pub formula: String,
    /// e.g. `p' = 0.250000 + ½(0.300000) + ½(0.200000)`
    pub substitution: String,
}

/// Allele frequencies recovered from genotype frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct ConservationCheck {
    reconstructions: Vec<AlleleReconstruction>,
}

impl ConservationCheck {
    pub fn get(&self, allele: Allele) -> Option<&AlleleReconstruction> {
        self.reconstructions.iter().find(|rec| rec.allele == allele)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlleleReconstruction> {
        self.reconstructions.iter()
    }

    pub fn len(&self) -> usize {
        self.reconstructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reconstructions.is_empty()
    }

    /// Largest `|reconstructed - original|` over all alleles.
    pub fn max_deviation(&self, original: &AlleleFrequencies) -> f64 {
        self.reconstructions
            .iter()
            .map(|rec| (rec.value - original.get(rec.allele)).abs())
            .fold(0.0, f64::max)
    }

    pub fn is_conserved(&self, original: &AlleleFrequencies, tolerance: f64) -> bool {
        self.len() == original.count().get() && self.max_deviation(original) <= tolerance
    }
}

/// Reconstruct next-generation allele frequencies from genotype frequencies.
///
/// For each allele the homozygote contributes its full frequency and every
/// heterozygote carrying the allele contributes half of its frequency.
pub fn conservation_check(
    freqs: &AlleleFrequencies,
    genotypes: &GenotypeFrequencies,
) -> ConservationCheck {
    let reconstructions = freqs
        .count()
        .alleles()
        .iter()
        .map(|&allele| reconstruct(allele, genotypes))
        .collect();
    ConservationCheck { reconstructions }
}

fn reconstruct(allele: Allele, genotypes: &GenotypeFrequencies) -> AlleleReconstruction {
    let mut value = 0.0;
    let mut formula_terms = Vec::new();
    let mut substitution_terms = Vec::new();

    for (genotype, freq) in genotypes.iter() {
        match genotype.dosage(allele) {
            2 => {
                value += freq;
                formula_terms.push(genotype.expression());
                substitution_terms.push(format!("{freq:.6}"));
            }
            1 => {
                value += 0.5 * freq;
                formula_terms.push(format!("½({})", genotype.expression()));
                substitution_terms.push(format!("½({freq:.6})"));
            }
            _ => {}
        }
    }

    let symbol = allele.symbol();
    AlleleReconstruction {
        allele,
        value,
        formula: format!("{symbol}' = {}", formula_terms.join(" + ")),
        substitution: format!("{symbol}' = {}", substitution_terms.join(" + ")),
    }
}
