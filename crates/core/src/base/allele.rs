use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::NormalizationError;

/// One of the (at most three) alleles of the locus.
///
/// The mapping of variants to integers is stable and used throughout the
/// crate (A=0, B=1, C=2). Each allele also has the conventional frequency
/// symbol used in formulas: `p` for A, `q` for B and `r` for C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Allele {
    A = 0,
    B = 1,
    C = 2,
}

impl Allele {
    pub const ALL: [Allele; 3] = [Allele::A, Allele::B, Allele::C];

    /// Convert from index (0-2)
    #[inline(always)]
    pub const fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn to_index(self) -> usize {
        self as usize
    }

    /// Parse a letter name (`b'A'`, `b'B'`, `b'C'`), case-insensitive.
    #[inline]
    pub const fn from_letter(byte: u8) -> Option<Self> {
        match byte {
            b'A' | b'a' => Some(Self::A),
            b'B' | b'b' => Some(Self::B),
            b'C' | b'c' => Some(Self::C),
            _ => None,
        }
    }

    /// Parse the digit of a numbered name (`A1`, `A2`, `A3`).
    #[inline]
    pub const fn from_digit(byte: u8) -> Option<Self> {
        match byte {
            b'1' => Some(Self::A),
            b'2' => Some(Self::B),
            b'3' => Some(Self::C),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn to_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }

    /// Frequency symbol used in formulas (`p`, `q`, `r`).
    #[inline(always)]
    pub const fn symbol(self) -> char {
        match self {
            Self::A => 'p',
            Self::B => 'q',
            Self::C => 'r',
        }
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Number of alleles segregating at the locus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum AlleleCount {
    Two,
    #[default]
    Three,
}

impl AlleleCount {
    #[inline(always)]
    pub const fn get(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// The alleles present at a locus of this size, in index order.
    pub fn alleles(self) -> &'static [Allele] {
        &Allele::ALL[..self.get()]
    }

    /// Number of distinct unordered genotypes, `k(k+1)/2`.
    pub const fn genotype_count(self) -> usize {
        let k = self.get();
        k * (k + 1) / 2
    }
}

impl TryFrom<usize> for AlleleCount {
    type Error = NormalizationError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(NormalizationError::UnsupportedAlleleCount(other)),
        }
    }
}

impl From<AlleleCount> for usize {
    fn from(count: AlleleCount) -> usize {
        count.get()
    }
}

impl fmt::Display for AlleleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
