//! `gascheck archive`

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use gascheck::config::Config;
use gascheck::deadline::parse_utc_offset;
use gascheck::operations::archive_with_derived;
use gascheck::repository::{FileHistoryStore, HistoricalSampleStore};
use gascheck::sample::Sample;

pub fn cmd_archive(config: &Config, sample_path: &Path, append: Option<&Path>) -> Result<()> {
    let sample = Sample::load(sample_path)?;
    let offset = parse_utc_offset(&config.deadlines.utc_offset)?;

    let record = archive_with_derived(&sample, &config.reference_conditions(), offset)
        .with_context(|| format!("Cannot archive {}", sample_path.display()))?;

    print!(
        "{}",
        serde_yaml::to_string(&record).context("Failed to serialize archived sample")?
    );

    if let Some(path) = append {
        let mut store = FileHistoryStore::new(path);
        let bulletin_id = record.bulletin_id.clone();
        store.append(record)?;
        eprintln!(
            "{} Archived {} to {}",
            "✓".green(),
            bulletin_id.cyan(),
            path.display()
        );
    }

    Ok(())
}
