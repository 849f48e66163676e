//! Base types for describing a single locus.
//!
//! This module provides alleles, allele counts, genotypes and the normalized
//! allele-frequency vector shared by every other part of the crate.

mod allele;
mod frequencies;
mod genotype;

pub use allele::{Allele, AlleleCount};
pub use frequencies::AlleleFrequencies;
pub use genotype::Genotype;
