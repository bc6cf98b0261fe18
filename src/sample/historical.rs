//! Archived samples, read-only input to the SPC engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog;

use super::PropertyId;

/// An immutable record of a past validated bulletin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSample {
    pub bulletin_id: String,
    pub collection_date: NaiveDate,
    /// Component key to molar percent (or fraction, in older records).
    #[serde(default)]
    pub components: BTreeMap<String, f64>,
    /// Property key to value.
    #[serde(default)]
    pub properties: BTreeMap<String, f64>,
}

impl HistoricalSample {
    pub fn new(bulletin_id: impl Into<String>, collection_date: NaiveDate) -> Self {
        Self {
            bulletin_id: bulletin_id.into(),
            collection_date,
            components: BTreeMap::new(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, name: &str, value: f64) -> Self {
        let key = catalog::canonical_key(name).unwrap_or(name);
        self.components.insert(key.to_string(), value);
        self
    }

    pub fn with_property(mut self, id: PropertyId, value: f64) -> Self {
        self.properties.insert(id.key().to_string(), value);
        self
    }

    /// Concentration recorded for a component.
    ///
    /// Older records may use aliases ("CO2") rather than canonical keys, so a
    /// miss on the exact key falls back to comparing canonical forms.
    pub fn component_value(&self, name: &str) -> Option<f64> {
        if let Some(v) = self.components.get(name) {
            return Some(*v);
        }

        let wanted = catalog::canonical_key(name)?;
        self.components
            .iter()
            .find(|(k, _)| catalog::canonical_key(k) == Some(wanted))
            .map(|(_, v)| *v)
    }

    pub fn property_value(&self, id: PropertyId) -> Option<f64> {
        self.properties.get(id.key()).copied()
    }
}
