//! A single species in the gas mixture.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::reading::Reading;
use crate::status::ValidationStatus;

/// One component row of a bulletin.
///
/// `aga8_min`/`aga8_max` override the reference table for this sample only.
/// The CEP limits and both statuses are outputs, recomputed on every pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub molar_percent: Reading,
    #[serde(default)]
    pub uncertainty_percent: Reading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aga8_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aga8_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep_lower_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep_upper_limit: Option<f64>,
    #[serde(default)]
    pub aga8_status: ValidationStatus,
    #[serde(default)]
    pub cep_status: ValidationStatus,
}

impl Component {
    pub fn new(name: impl Into<String>, molar_percent: Reading) -> Self {
        Self {
            name: name.into(),
            molar_percent,
            ..Default::default()
        }
    }

    /// Override the static AGA-8 ceiling for this sample.
    pub fn with_aga8_max(mut self, max: f64) -> Self {
        self.aga8_max = Some(max);
        self
    }

    pub fn with_uncertainty(mut self, uncertainty: Reading) -> Self {
        self.uncertainty_percent = uncertainty;
        self
    }

    pub fn canonical_key(&self) -> Option<&'static str> {
        catalog::canonical_key(&self.name)
    }

    /// Key used for history lookups: canonical when known, raw name otherwise.
    pub fn history_key(&self) -> String {
        self.canonical_key()
            .map(str::to_string)
            .unwrap_or_else(|| self.name.clone())
    }

    /// Static AGA-8 bounds: per-sample overrides first, then the reference table.
    ///
    /// Returns `None` when the component is unknown and no override is given.
    pub fn static_bounds(&self) -> Option<(f64, f64)> {
        let reference = catalog::lookup(&self.name);
        let min = self.aga8_min.or(reference.map(|r| r.aga8_min))?;
        let max = self.aga8_max.or(reference.map(|r| r.aga8_max))?;
        Some((min, max))
    }

    /// True when something was entered, even if it did not parse.
    pub fn has_input(&self) -> bool {
        !self.molar_percent.is_blank()
    }
}
