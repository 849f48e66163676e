use anyhow::{Context, Result};
use hardy_core::config::SamplingConfig;
use hardy_core::service::respond;
use hardy_core::HardyError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub fn load_config(path: Option<&Path>) -> Result<SamplingConfig> {
    let Some(path) = path else {
        return Ok(SamplingConfig::default());
    };
    let config = SamplingConfig::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    debug!(path = %path.display(), ?config, "loaded sampling config");
    Ok(config)
}

/// Write to `output`, or to stdout when no file is given.
pub fn write_output(content: &str, output: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Output written to {}", path.display());
    } else if content.ends_with('\n') {
        print!("{content}");
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Emit the JSON document for an outcome, then fail if it was an error so the
/// process exits non-zero after the `{"error": ...}` body is out.
pub fn emit_json<T: Serialize>(
    outcome: Result<T, HardyError>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let body = respond(&outcome);
    write_output(&serde_json::to_string_pretty(&body)?, output)?;
    outcome?;
    Ok(())
}
