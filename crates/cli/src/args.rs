use anyhow::{Context, Result};
use clap::Args;
use hardy_core::AlleleCount;
use std::path::PathBuf;

use crate::defaults;

#[derive(Args, Debug)]
pub struct LocusArgs {
    /// Number of alleles at the locus (2 or 3)
    #[arg(
        short,
        long,
        default_value_t = defaults::ALLELES,
        value_parser = clap::value_parser!(u8).range(2..=3)
    )]
    pub alleles: u8,
}

impl LocusArgs {
    pub fn count(&self) -> Result<AlleleCount> {
        AlleleCount::try_from(usize::from(self.alleles)).context("Invalid allele count")
    }
}

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Frequency of allele A
    #[arg(short, long, allow_negative_numbers = true)]
    pub p: f64,

    /// Frequency of allele B
    #[arg(short, long, allow_negative_numbers = true)]
    pub q: f64,

    /// Frequency of allele C (ignored for two alleles)
    #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
    pub r: f64,

    #[command(flatten)]
    pub locus: LocusArgs,

    /// Output format (pretty, json)
    #[arg(short, long, default_value = defaults::COMPUTE_FORMAT)]
    pub format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GridArgs {
    /// Genotype to sample (e.g. AA, AB, A1A2); repeat for several surfaces
    #[arg(short, long = "genotype", required = true)]
    pub genotypes: Vec<String>,

    /// Points per axis
    ///
    /// Missing or non-positive values use the configured default.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub resolution: Option<i64>,

    #[command(flatten)]
    pub locus: LocusArgs,

    /// Output format (json, csv)
    ///
    /// CSV lists the valid ternary points of a single genotype.
    #[arg(short, long, default_value = defaults::GRID_FORMAT)]
    pub format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
