//! `gascheck properties`

use anyhow::{Context, Result};
use std::path::Path;

use gascheck::config::Config;
use gascheck::formatters::format_derived;
use gascheck::properties::derive_properties;
use gascheck::sample::Sample;

use crate::cli::OutputFormat;

pub fn cmd_properties(config: &Config, sample_path: &Path, format: OutputFormat) -> Result<()> {
    let sample = Sample::load(sample_path)?;
    let derived = derive_properties(&sample, &config.reference_conditions());

    match format {
        OutputFormat::Text => println!("{}", format_derived(&derived)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&derived.properties)
                .context("Failed to serialize properties")?
        ),
    }

    Ok(())
}
