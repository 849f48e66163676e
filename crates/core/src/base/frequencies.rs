use super::{Allele, AlleleCount};

/// Allele frequencies of a locus, guaranteed to lie on the simplex.
///
/// Values are non-negative and sum to 1 within the normalization tolerance.
/// The only way to obtain one is [`normalize`](crate::normalize::normalize);
/// downstream code can read but never modify it. For a two-allele locus the
/// third component is always 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlleleFrequencies {
    values: [f64; 3],
    count: AlleleCount,
}

impl AlleleFrequencies {
    pub(crate) fn from_simplex(values: [f64; 3], count: AlleleCount) -> Self {
        Self { values, count }
    }

    pub fn count(&self) -> AlleleCount {
        self.count
    }

    pub fn p(&self) -> f64 {
        self.values[0]
    }

    pub fn q(&self) -> f64 {
        self.values[1]
    }

    pub fn r(&self) -> f64 {
        self.values[2]
    }

    pub fn get(&self, allele: Allele) -> f64 {
        self.values[allele.to_index()]
    }

    /// All three components, with `r = 0` for a two-allele locus.
    pub fn as_array(&self) -> [f64; 3] {
        self.values
    }

    /// Only the components present at this locus.
    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.count.get()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Allele, f64)> + '_ {
        self.count
            .alleles()
            .iter()
            .map(move |&allele| (allele, self.get(allele)))
    }

    pub fn sum(&self) -> f64 {
        self.as_slice().iter().sum()
    }
}
