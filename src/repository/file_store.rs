use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::sample::HistoricalSample;

use super::history_store::{ensure_unique, insert_sorted, HistoricalSampleStore};

/// File-based implementation of HistoricalSampleStore.
///
/// The file holds a YAML sequence of archived samples. A missing file reads
/// as an empty history.
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<HistoricalSample>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history from {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<HistoricalSample> = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse history in {}", self.path.display()))?;

        let mut samples = Vec::with_capacity(records.len());
        for record in records {
            insert_sorted(&mut samples, record);
        }
        Ok(samples)
    }
}

impl HistoricalSampleStore for FileHistoryStore {
    fn append(&mut self, sample: HistoricalSample) -> Result<()> {
        let mut samples = self.load()?;
        ensure_unique(&samples, &sample)?;
        insert_sorted(&mut samples, sample);

        let content = serde_yaml::to_string(&samples).context("Failed to serialize history")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write history to {}", self.path.display()))?;
        Ok(())
    }

    fn read_recent(&self, n: usize) -> Result<Vec<HistoricalSample>> {
        let mut samples = self.load()?;
        samples.truncate(n);
        Ok(samples)
    }
}
