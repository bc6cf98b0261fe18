use anyhow::Result;

use crate::sample::HistoricalSample;

use super::history_store::{ensure_unique, insert_sorted, HistoricalSampleStore};

/// In-memory implementation of HistoricalSampleStore.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    samples: Vec<HistoricalSample>,
}

impl InMemoryHistoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with samples in any order.
    pub fn with_samples(samples: Vec<HistoricalSample>) -> Self {
        let mut store = Self::new();
        for sample in samples {
            insert_sorted(&mut store.samples, sample);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl HistoricalSampleStore for InMemoryHistoryStore {
    fn append(&mut self, sample: HistoricalSample) -> Result<()> {
        ensure_unique(&self.samples, &sample)?;
        insert_sorted(&mut self.samples, sample);
        Ok(())
    }

    fn read_recent(&self, n: usize) -> Result<Vec<HistoricalSample>> {
        Ok(self.samples.iter().take(n).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(id: &str, day: u32) -> HistoricalSample {
        HistoricalSample::new(id, NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
    }

    fn ids(samples: &[HistoricalSample]) -> Vec<&str> {
        samples.iter().map(|s| s.bulletin_id.as_str()).collect()
    }

    #[test]
    fn test_read_recent_is_most_recent_first() {
        let store = InMemoryHistoryStore::with_samples(vec![
            sample("B-1", 1),
            sample("B-3", 20),
            sample("B-2", 10),
        ]);
        assert_eq!(ids(&store.read_recent(2).unwrap()), vec!["B-3", "B-2"]);
        assert_eq!(ids(&store.read_all().unwrap()), vec!["B-3", "B-2", "B-1"]);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut store = InMemoryHistoryStore::new();
        store.append(sample("B-2", 10)).unwrap();
        store.append(sample("B-1", 1)).unwrap();
        store.append(sample("B-3", 15)).unwrap();
        assert_eq!(ids(&store.read_all().unwrap()), vec!["B-3", "B-2", "B-1"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_same_day_last_archived_first() {
        let mut store = InMemoryHistoryStore::new();
        store.append(sample("B-1", 5)).unwrap();
        store.append(sample("B-2", 5)).unwrap();
        assert_eq!(ids(&store.read_recent(1).unwrap()), vec!["B-2"]);
    }

    #[test]
    fn test_duplicate_bulletin_rejected() {
        let mut store = InMemoryHistoryStore::new();
        store.append(sample("B-1", 5)).unwrap();
        let err = store.append(sample("B-1", 6)).unwrap_err();
        assert!(err.to_string().contains("already archived"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_read_recent_more_than_stored() {
        let store = InMemoryHistoryStore::with_samples(vec![sample("B-1", 1)]);
        assert_eq!(store.read_recent(8).unwrap().len(), 1);
        assert!(InMemoryHistoryStore::new().read_recent(8).unwrap().is_empty());
    }
}
