//! Bulletin sample records: composition, properties, lifecycle dates and the
//! immutable historical samples used for SPC.

mod component;
mod historical;
mod lifecycle;
mod property;

pub use component::Component;
pub use historical::HistoricalSample;
pub use lifecycle::{
    FinalDecision, LifecycleDates, OperatingConditions, ProcessType, SampleDate, SampleDateError,
};
pub use property::{PropertyId, PropertyOrigin, SampleProperty};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog;
use crate::frontmatter::yaml_payload;

/// A chromatography bulletin under validation.
///
/// The caller mutates it as data arrives; the engine only ever reads it and
/// returns validated copies of its components and properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulletin_id: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub properties: Vec<SampleProperty>,
    #[serde(default)]
    pub conditions: OperatingConditions,
    #[serde(default)]
    pub dates: LifecycleDates,
    #[serde(default)]
    pub process_type: ProcessType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<FinalDecision>,
    #[serde(default)]
    pub resampling_recommended: bool,
}

impl Sample {
    /// Load a sample from a YAML file, or a markdown file with YAML frontmatter.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid sample in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(&yaml_payload(content)).context("Failed to parse sample")
    }

    /// Find a component by canonical key, label or alias.
    pub fn component(&self, name: &str) -> Option<&Component> {
        match catalog::canonical_key(name) {
            Some(key) => self
                .components
                .iter()
                .find(|c| c.canonical_key() == Some(key)),
            None => self.components.iter().find(|c| c.name == name),
        }
    }

    /// Parsed concentration of a component in molar percent.
    pub fn concentration(&self, name: &str) -> Option<f64> {
        self.component(name).and_then(|c| c.molar_percent.value())
    }

    pub fn property(&self, id: PropertyId) -> Option<&SampleProperty> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// Parsed value of a property, if present.
    pub fn property_value(&self, id: PropertyId) -> Option<f64> {
        self.property(id).and_then(|p| p.value.value())
    }

    /// Sum of all parsed concentrations, in percent.
    pub fn total_concentration(&self) -> f64 {
        self.components
            .iter()
            .map(|c| c.molar_percent.value_or_zero())
            .sum()
    }

    /// Number of components with a concentration above zero.
    pub fn positive_component_count(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.molar_percent.is_positive())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;

    fn sample() -> Sample {
        Sample {
            components: vec![
                Component::new("CO2", Reading::Value(2.0)),
                Component::new("methane", Reading::Value(90.0)),
                Component::new("xenon", Reading::Value(0.5)),
                Component::new("ethane", Reading::Blank),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_component_lookup_by_alias() {
        let s = sample();
        assert_eq!(s.concentration(catalog::CARBON_DIOXIDE), Some(2.0));
        assert_eq!(s.concentration("C1"), Some(90.0));
        assert_eq!(s.concentration("xenon"), Some(0.5));
        assert_eq!(s.concentration("ethane"), None);
        assert!(s.component("propane").is_none());
    }

    #[test]
    fn test_totals() {
        let s = sample();
        assert!((s.total_concentration() - 92.5).abs() < 1e-9);
        assert_eq!(s.positive_component_count(), 3);
    }

    #[test]
    fn test_parse_yaml_sample() {
        let yaml = r#"
bulletin_id: BUL-0042
components:
  - name: methane
    molar_percent: "89,5"
  - name: CO2
    molar_percent: 1.2
properties:
  - id: calorific_value
    value: "39.1"
conditions:
  pressure_kpa: 5000
  temperature_c: 25
dates:
  collection: 2024-03-01
  bulletin_issue: 2024-03-12T14:30:00-03:00
process_type: without_validation
decision: not_validated
resampling_recommended: true
"#;
        let s: Sample = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(s.bulletin_id.as_deref(), Some("BUL-0042"));
        assert_eq!(s.concentration("methane"), Some(89.5));
        assert_eq!(s.property_value(PropertyId::CalorificValue), Some(39.1));
        assert_eq!(s.conditions.pressure_kpa.value(), Some(5000.0));
        assert_eq!(s.process_type, ProcessType::WithoutValidation);
        assert_eq!(s.decision, Some(FinalDecision::NotValidated));
        assert!(s.dates.collection.is_some());
        assert!(s.dates.lab_receipt.is_none());
    }

    #[test]
    fn test_parse_markdown_sample() {
        let content = "---\nbulletin_id: BUL-7\ncomponents:\n  - name: C1\n    molar_percent: 95\n---\n\nField notes.\n";
        let s = Sample::parse(content).unwrap();
        assert_eq!(s.bulletin_id.as_deref(), Some("BUL-7"));
        assert_eq!(s.concentration("methane"), Some(95.0));
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let err = Sample::parse("dates:\n  collection: 01/03/2024\n").unwrap_err();
        assert!(format!("{:#}", err).contains("01/03/2024"));
    }
}
