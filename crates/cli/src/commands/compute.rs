use anyhow::{bail, Result};
use hardy_core::config::SamplingConfig;
use hardy_core::normalize::range_advisories;
use hardy_core::service::compute_genotypes;
use tracing::warn;

use crate::args::ComputeArgs;
use crate::printing::genotype_report;
use crate::utils::{emit_json, write_output};

pub fn compute_point(args: &ComputeArgs, config: &SamplingConfig) -> Result<()> {
    let count = args.locus.count()?;
    let raw = [args.p, args.q, args.r];

    for advisory in range_advisories(&raw, count) {
        warn!("{advisory}");
    }

    match args.format.as_str() {
        "json" => emit_json(compute_genotypes(&raw, count, config), args.output.as_ref()),
        "pretty" => {
            let response = compute_genotypes(&raw, count, config)?;
            write_output(&genotype_report(&response, count), args.output.as_ref())
        }
        other => bail!("Unknown format '{other}'. Use: pretty or json"),
    }
}
