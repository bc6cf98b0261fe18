//! `gascheck validate`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use gascheck::clock::{Clock, FixedClock, SystemClock};
use gascheck::config::Config;
use gascheck::formatters::format_report;
use gascheck::orchestrator::ValidationOrchestrator;
use gascheck::repository::{FileHistoryStore, HistoricalSampleStore, InMemoryHistoryStore};
use gascheck::sample::Sample;

use crate::cli::OutputFormat;

pub fn cmd_validate(
    config: &Config,
    sample_path: &Path,
    history_path: Option<&Path>,
    format: OutputFormat,
    now: Option<&str>,
) -> Result<()> {
    let sample = Sample::load(sample_path)?;
    let orchestrator = ValidationOrchestrator::new(config.clone())?;

    let clock: Box<dyn Clock> = match now {
        Some(raw) => Box::new(FixedClock(parse_now(raw)?)),
        None => Box::new(SystemClock),
    };

    let store: Box<dyn HistoricalSampleStore> = match history_path {
        Some(path) => Box::new(FileHistoryStore::new(path)),
        None => Box::new(InMemoryHistoryStore::new()),
    };

    let report = orchestrator.validate(&sample, store.as_ref(), clock.as_ref())?;

    match format {
        OutputFormat::Text => println!("{}", format_report(&report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }

    Ok(())
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid --now '{}': expected RFC 3339", raw))
}
