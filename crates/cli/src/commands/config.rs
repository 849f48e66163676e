use anyhow::{Context, Result};
use hardy_core::config::SamplingConfig;
use std::path::PathBuf;

use crate::utils::write_output;

/// Print the effective sampling configuration, or save it for later `--config` use.
pub fn show_config(config: &SamplingConfig, output: Option<&PathBuf>) -> Result<()> {
    let json = config
        .to_json()
        .context("Failed to serialize sampling config")?;
    write_output(&json, output)
}
