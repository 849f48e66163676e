use hardy_core::format::{GenotypeResponse, NextGeneration};
use hardy_core::{AlleleCount, Genotype};

/// Plain-text report of a single-point computation.
pub fn genotype_report(response: &GenotypeResponse, count: AlleleCount) -> String {
    let mut out = String::from("Input allele freqs:\n");
    let input = &response.input;
    out.push_str(&format!(
        "  p = {:.6}, q = {:.6}, r = {:.6}\n",
        input.p, input.q, input.r
    ));
    if response.normalized {
        out.push_str("  (normalized to sum to 1)\n");
    }

    out.push_str("\nGenotype frequencies:\n");
    for genotype in Genotype::all(count) {
        let label = genotype.to_string();
        if let Some(line) = response.verbose_genotypes.get(&label) {
            out.push_str(&format!("  {label}: {line}\n"));
        }
    }

    out.push_str("\nAllele frequency reconstruction (next generation):\n");
    let conservation = &response.conservation;
    out.push_str(&next_generation_line("p'", &conservation.p_next));
    out.push_str(&next_generation_line("q'", &conservation.q_next));
    if let Some(r_next) = &conservation.r_next {
        out.push_str(&next_generation_line("r'", r_next));
    }
    out
}

fn next_generation_line(name: &str, next: &NextGeneration) -> String {
    format!(
        "  {name} = {:.8}  ({} -> {})\n",
        next.value, next.formula, next.substitution
    )
}

/// Genotype labels of a locus with their Hardy-Weinberg expressions.
pub fn genotype_table(count: AlleleCount) -> String {
    let mut out = format!("{count} alleles, {} genotypes\n", count.genotype_count());
    for genotype in Genotype::all(count) {
        let kind = if genotype.is_homozygote() {
            "homozygote"
        } else {
            "heterozygote"
        };
        let label = genotype.to_string();
        out.push_str(&format!("  {label:<4}{:<6}{kind}\n", genotype.expression()));
    }
    out
}
