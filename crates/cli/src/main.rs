mod args;
mod commands;
pub mod defaults;
mod printing;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

use args::{ComputeArgs, GridArgs, LocusArgs};
use commands::{compute, config, curve, genotypes, grid};

/// Hardy: Hardy-Weinberg genotype frequencies on the allele simplex
///
/// Computes equilibrium genotype frequencies for two or three alleles, checks
/// that allele frequencies are conserved into the next generation, and samples
/// genotype frequency surfaces over the whole simplex for plotting.
#[derive(Parser, Debug)]
#[command(name = "hardy")]
#[command(author, version, about = "Hardy-Weinberg genotype frequencies and simplex surfaces", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Sampling configuration file (JSON)
    #[arg(long, global = true, env = defaults::CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute genotype frequencies for one set of allele frequencies.
    ///
    /// Inputs that do not sum to 1 are normalized first.
    Compute(ComputeArgs),

    /// Sample genotype frequency surfaces over the allele simplex.
    Grid(GridArgs),

    /// Sample a two-allele genotype along p + q = 1.
    Curve {
        /// Two-allele genotype (AA, AB or BB)
        #[arg(short, long)]
        genotype: String,

        /// Number of points
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        resolution: Option<i64>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the genotypes of a locus.
    Genotypes(LocusArgs),

    /// Show the effective sampling configuration.
    ///
    /// Write it to a file to get a starting point for --config.
    Config {
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let sampling = utils::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Compute(args) => {
            compute::compute_point(&args, &sampling)?;
        }
        Commands::Grid(args) => {
            grid::sample_grids(&args, &sampling)?;
        }
        Commands::Curve {
            genotype,
            resolution,
            output,
        } => {
            curve::sample_curve(&genotype, resolution, output.as_ref(), &sampling)?;
        }
        Commands::Genotypes(locus) => {
            genotypes::list_genotypes(&locus)?;
        }
        Commands::Config { output } => {
            config::show_config(&sampling, output.as_ref())?;
        }
    }

    Ok(())
}
