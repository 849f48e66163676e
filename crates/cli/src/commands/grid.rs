use anyhow::{bail, Context, Result};
use hardy_core::config::SamplingConfig;
use hardy_core::service::{grid, grid_csv, respond};
use rayon::prelude::*;
use serde_json::Value;
use tracing::info;

use crate::args::GridArgs;
use crate::utils::{emit_json, write_output};

pub fn sample_grids(args: &GridArgs, config: &SamplingConfig) -> Result<()> {
    let count = args.locus.count()?;

    match args.format.as_str() {
        "csv" => {
            let [genotype] = args.genotypes.as_slice() else {
                bail!(
                    "CSV output takes exactly one genotype, got {}",
                    args.genotypes.len()
                );
            };
            let csv = grid_csv(genotype, args.resolution, count, config)
                .with_context(|| format!("Failed to sample genotype {genotype}"))?;
            write_output(&csv, args.output.as_ref())
        }
        "json" => {
            info!(
                genotypes = args.genotypes.len(),
                threads = rayon::current_num_threads(),
                "sampling genotype grids"
            );
            // Each surface is independent; collect keeps input order.
            let mut outcomes: Vec<_> = args
                .genotypes
                .par_iter()
                .map(|genotype| grid(genotype, args.resolution, count, config))
                .collect();

            if outcomes.len() == 1 {
                return emit_json(outcomes.remove(0), args.output.as_ref());
            }

            let body = Value::Array(outcomes.iter().map(respond).collect());
            write_output(&serde_json::to_string_pretty(&body)?, args.output.as_ref())?;
            for outcome in outcomes {
                outcome?;
            }
            Ok(())
        }
        other => bail!("Unknown format '{other}'. Use: json or csv"),
    }
}
