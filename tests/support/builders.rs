use chrono::NaiveDate;
use gascheck::reading::Reading;
use gascheck::sample::{
    Component, FinalDecision, HistoricalSample, ProcessType, PropertyId, Sample, SampleDate,
    SampleProperty,
};

/// Fluent construction of bulletin samples.
pub struct SampleBuilder {
    sample: Sample,
}

impl SampleBuilder {
    pub fn new(bulletin_id: &str) -> Self {
        Self {
            sample: Sample {
                bulletin_id: Some(bulletin_id.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn component(mut self, name: &str, percent: f64) -> Self {
        self.sample
            .components
            .push(Component::new(name, Reading::Value(percent)));
        self
    }

    pub fn raw_component(mut self, name: &str, raw: &str) -> Self {
        self.sample
            .components
            .push(Component::new(name, Reading::parse(raw)));
        self
    }

    pub fn property(mut self, id: PropertyId, value: f64) -> Self {
        self.sample
            .properties
            .push(SampleProperty::new(id, Reading::Value(value)));
        self
    }

    pub fn conditions(mut self, pressure_kpa: f64, temperature_c: f64) -> Self {
        self.sample.conditions.pressure_kpa = Reading::Value(pressure_kpa);
        self.sample.conditions.temperature_c = Reading::Value(temperature_c);
        self
    }

    pub fn collected(mut self, date: &str) -> Self {
        self.sample.dates.collection = Some(parse_date(date));
        self
    }

    pub fn lab_received(mut self, date: &str) -> Self {
        self.sample.dates.lab_receipt = Some(parse_date(date));
        self
    }

    pub fn analysed(mut self, date: &str) -> Self {
        self.sample.dates.lab_analysis = Some(parse_date(date));
        self
    }

    pub fn issued(mut self, date: &str) -> Self {
        self.sample.dates.bulletin_issue = Some(parse_date(date));
        self
    }

    pub fn requester_received(mut self, date: &str) -> Self {
        self.sample.dates.requester_receipt = Some(parse_date(date));
        self
    }

    pub fn implemented(mut self, date: &str) -> Self {
        self.sample.dates.implementation = Some(parse_date(date));
        self
    }

    pub fn reviewed(mut self, date: &str) -> Self {
        self.sample.dates.critical_review = Some(parse_date(date));
        self
    }

    pub fn process_type(mut self, process_type: ProcessType) -> Self {
        self.sample.process_type = process_type;
        self
    }

    pub fn rejected_with_resampling(mut self) -> Self {
        self.sample.decision = Some(FinalDecision::NotValidated);
        self.sample.resampling_recommended = true;
        self
    }

    pub fn build(self) -> Sample {
        self.sample
    }
}

/// Fluent construction of archived samples.
pub struct HistoryBuilder {
    record: HistoricalSample,
}

impl HistoryBuilder {
    pub fn new(bulletin_id: &str, collection_date: NaiveDate) -> Self {
        Self {
            record: HistoricalSample::new(bulletin_id, collection_date),
        }
    }

    pub fn component(mut self, name: &str, value: f64) -> Self {
        self.record = self.record.with_component(name, value);
        self
    }

    pub fn property(mut self, id: PropertyId, value: f64) -> Self {
        self.record = self.record.with_property(id, value);
        self
    }

    pub fn build(self) -> HistoricalSample {
        self.record
    }
}

fn parse_date(date: &str) -> SampleDate {
    date.parse().expect("valid sample date")
}
