use anyhow::Result;

use crate::sample::HistoricalSample;

/// A trait for appending and reading archived samples from a storage backend.
///
/// Records are append-only: a stored sample is never modified.
pub trait HistoricalSampleStore {
    /// Append an archived sample. Fails if the bulletin id is already stored.
    fn append(&mut self, sample: HistoricalSample) -> Result<()>;

    /// Up to `n` samples, most recent collection date first.
    fn read_recent(&self, n: usize) -> Result<Vec<HistoricalSample>>;

    /// Every stored sample, most recent collection date first.
    fn read_all(&self) -> Result<Vec<HistoricalSample>> {
        self.read_recent(usize::MAX)
    }
}

/// Insert keeping `samples` sorted by collection date, most recent first.
///
/// A sample sharing its date with stored ones goes ahead of them, so the last
/// archived wins ties.
pub(crate) fn insert_sorted(samples: &mut Vec<HistoricalSample>, sample: HistoricalSample) {
    let position = samples
        .iter()
        .position(|s| s.collection_date <= sample.collection_date)
        .unwrap_or(samples.len());
    samples.insert(position, sample);
}

pub(crate) fn ensure_unique(samples: &[HistoricalSample], sample: &HistoricalSample) -> Result<()> {
    if samples.iter().any(|s| s.bulletin_id == sample.bulletin_id) {
        anyhow::bail!("Bulletin {} is already archived", sample.bulletin_id);
    }
    Ok(())
}
