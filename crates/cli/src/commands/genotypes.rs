use anyhow::Result;

use crate::args::LocusArgs;
use crate::printing::genotype_table;

pub fn list_genotypes(locus: &LocusArgs) -> Result<()> {
    let count = locus.count()?;
    print!("{}", genotype_table(count));
    Ok(())
}
