use chrono::{Duration, NaiveDate};
use gascheck::sample::{HistoricalSample, PropertyId, Sample};

use super::builders::{HistoryBuilder, SampleBuilder};

/// SampleFactory provides ready-made bulletins for common scenarios.
pub struct SampleFactory;

impl SampleFactory {
    /// A complete, balanced pipeline gas analysis inside every AGA-8 bound.
    pub fn pipeline_gas(id: &str) -> Sample {
        Self::pipeline_builder(id).build()
    }

    /// Builder preloaded with the pipeline gas composition (ten components,
    /// summing to 100%).
    pub fn pipeline_builder(id: &str) -> SampleBuilder {
        SampleBuilder::new(id)
            .component("methane", 89.0)
            .component("ethane", 5.5)
            .component("propane", 1.2)
            .component("i_butane", 0.05)
            .component("n_butane", 0.25)
            .component("i_pentane", 0.05)
            .component("n_pentane", 0.05)
            .component("n_hexane", 0.05)
            .component("nitrogen", 1.85)
            .component("carbon_dioxide", 2.0)
    }

    /// A nitrogen-rich gas whose CO2 exceeds the tightened ceiling.
    pub fn nitrogen_rich(id: &str) -> Sample {
        SampleBuilder::new(id)
            .component("methane", 72.0)
            .component("nitrogen", 16.0)
            .component("carbon_dioxide", 12.0)
            .build()
    }
}

/// HistoryFactory provides archived sample series.
pub struct HistoryFactory;

impl HistoryFactory {
    /// `n` weekly samples ending on 2024-02-26, most recent first.
    ///
    /// Methane alternates 89.0 / 89.2 and CO2 alternates 2.0 / 1.9, so every
    /// moving range is 0.2 (methane) or 0.1 (CO2).
    pub fn weekly(n: usize) -> Vec<HistoricalSample> {
        let last = NaiveDate::from_ymd_opt(2024, 2, 26).expect("valid date");
        (0..n)
            .map(|i| {
                let date = last - Duration::weeks(i as i64);
                let high = i % 2 == 1;
                HistoryBuilder::new(&format!("H-{:03}", i), date)
                    .component("methane", if high { 89.2 } else { 89.0 })
                    .component("carbon_dioxide", if high { 1.9 } else { 2.0 })
                    .property(PropertyId::CalorificValue, if high { 39.3 } else { 39.1 })
                    .build()
            })
            .collect()
    }
}
