use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Allele, AlleleCount};
use crate::errors::GenotypeError;

/// An unordered pair of alleles carried by a diploid individual.
///
/// The pair is stored in allele order, so `BA` and `AB` are the same value.
/// Labels are written with allele letters (`AA`, `AB`, ...); the numbered
/// form (`A1A2`) is accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Genotype {
    first: Allele,
    second: Allele,
}

impl Genotype {
    pub fn new(a: Allele, b: Allele) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub const fn homozygote(allele: Allele) -> Self {
        Self {
            first: allele,
            second: allele,
        }
    }

    pub fn first(self) -> Allele {
        self.first
    }

    pub fn second(self) -> Allele {
        self.second
    }

    pub fn is_homozygote(self) -> bool {
        self.first == self.second
    }

    /// Number of copies of `allele` in this genotype (0, 1 or 2).
    pub fn dosage(self, allele: Allele) -> u8 {
        u8::from(self.first == allele) + u8::from(self.second == allele)
    }

    /// Whether both alleles exist at a locus with `count` alleles.
    pub fn belongs_to(self, count: AlleleCount) -> bool {
        self.second.to_index() < count.get()
    }

    /// All genotypes of a locus, homozygotes first and then heterozygotes,
    /// each group in allele order: `AA, BB, CC, AB, AC, BC`.
    pub fn all(count: AlleleCount) -> Vec<Genotype> {
        let alleles = count.alleles();
        let mut genotypes: Vec<Genotype> = alleles.iter().map(|&a| Self::homozygote(a)).collect();
        for (i, &a) in alleles.iter().enumerate() {
            for &b in &alleles[i + 1..] {
                genotypes.push(Self::new(a, b));
            }
        }
        genotypes
    }

    /// Hardy-Weinberg expression in frequency symbols, e.g. `p²` or `2pq`.
    pub fn expression(self) -> String {
        if self.is_homozygote() {
            format!("{}²", self.first.symbol())
        } else {
            format!("2{}{}", self.first.symbol(), self.second.symbol())
        }
    }

    /// Equilibrium frequency at allele frequencies `values` (indexed by allele).
    #[inline]
    pub fn evaluate(self, values: &[f64; 3]) -> f64 {
        let x = values[self.first.to_index()];
        let y = values[self.second.to_index()];
        if self.is_homozygote() {
            x * x
        } else {
            2.0 * x * y
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

impl FromStr for Genotype {
    type Err = GenotypeError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let unrecognized = || GenotypeError::Unrecognized(label.to_string());
        let (a, b) = match label.trim().as_bytes() {
            [a, b] => (Allele::from_letter(*a), Allele::from_letter(*b)),
            [b'A' | b'a', i, b'A' | b'a', j] => (Allele::from_digit(*i), Allele::from_digit(*j)),
            _ => return Err(unrecognized()),
        };
        match (a, b) {
            (Some(a), Some(b)) => Ok(Self::new(a, b)),
            _ => Err(unrecognized()),
        }
    }
}

impl TryFrom<String> for Genotype {
    type Error = GenotypeError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl From<Genotype> for String {
    fn from(genotype: Genotype) -> String {
        genotype.to_string()
    }
}
