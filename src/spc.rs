//! Statistical process control (CEP) over historical samples.
//!
//! For each tracked parameter the engine takes the most recent historical
//! values, builds individuals/moving-range control limits and classifies the
//! current reading against them.

mod limits;

pub use limits::{
    classify, control_statistics, moving_ranges, normalize, ControlStatistics, UnitPolicy,
    D2_SUBGROUP_OF_TWO,
};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SpcConfig;
use crate::diagnostics::Diagnostic;
use crate::reading::Reading;
use crate::sample::{Component, HistoricalSample, PropertyId, SampleProperty};
use crate::status::{aggregate_cep, StatusItem, ValidationStatus};

/// A tracked quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Component by history key (canonical name when known).
    Component(String),
    Property(PropertyId),
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Component(name) => write!(f, "{}", name),
            Parameter::Property(id) => write!(f, "{}", id.key()),
        }
    }
}

/// SPC outcome for one parameter. Recomputed on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub parameter_name: String,
    pub current_value: Option<f64>,
    pub statistics: ControlStatistics,
    pub status: ValidationStatus,
}

/// SPC results for a whole sample.
#[derive(Debug, Clone)]
pub struct SpcAssessment {
    /// Components with CEP limits and status filled in.
    pub components: Vec<Component>,
    /// Properties with CEP limits and status filled in.
    pub properties: Vec<SampleProperty>,
    pub component_results: Vec<ValidationResult>,
    pub property_results: Vec<ValidationResult>,
    pub reference_status: ValidationStatus,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone)]
pub struct SpcEngine {
    config: SpcConfig,
}

impl Default for SpcEngine {
    fn default() -> Self {
        Self::new(SpcConfig::default())
    }
}

impl SpcEngine {
    pub fn new(config: SpcConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpcConfig {
        &self.config
    }

    fn policy_for(&self, parameter: &Parameter) -> UnitPolicy {
        match parameter {
            Parameter::Component(_) => self.config.component_units,
            Parameter::Property(_) => self.config.property_units,
        }
    }

    /// Up to `window` most recent values for a parameter, normalized against
    /// the current reading.
    ///
    /// History is re-sorted most-recent-first by collection date; samples
    /// lacking the parameter are skipped.
    pub fn history_values(
        &self,
        parameter: &Parameter,
        history: &[HistoricalSample],
        current: Option<f64>,
    ) -> Vec<f64> {
        let mut ordered: Vec<&HistoricalSample> = history.iter().collect();
        ordered.sort_by(|a, b| b.collection_date.cmp(&a.collection_date));

        let raw: Vec<f64> = ordered
            .into_iter()
            .filter_map(|h| match parameter {
                Parameter::Component(name) => h.component_value(name),
                Parameter::Property(id) => h.property_value(*id),
            })
            .filter(|v| v.is_finite())
            .take(self.config.window)
            .collect();

        normalize(&raw, self.policy_for(parameter), current)
    }

    /// Evaluate one parameter's current reading against its history.
    pub fn evaluate(
        &self,
        parameter: &Parameter,
        current: &Reading,
        history: &[HistoricalSample],
    ) -> ValidationResult {
        let values = self.history_values(parameter, history, current.value());
        let statistics =
            control_statistics(&values, self.config.sigma_multiplier, self.config.d2);
        let status = classify(current, &statistics, self.config.min_history);

        ValidationResult {
            parameter_name: parameter.to_string(),
            current_value: current.value(),
            statistics,
            status,
        }
    }

    /// Evaluate every component and property of a sample.
    pub fn assess(
        &self,
        components: &[Component],
        properties: &[SampleProperty],
        history: &[HistoricalSample],
    ) -> SpcAssessment {
        let mut items = Vec::new();
        let mut diagnostics = Vec::new();

        let mut validated_components = Vec::with_capacity(components.len());
        let mut component_results = Vec::with_capacity(components.len());
        for component in components {
            let parameter = Parameter::Component(component.history_key());
            let result = self.evaluate(&parameter, &component.molar_percent, history);

            let mut checked = component.clone();
            apply_limits(
                &result,
                &mut checked.cep_lower_limit,
                &mut checked.cep_upper_limit,
            );
            checked.cep_status = result.status;

            items.push(self.status_item(&result, &component.molar_percent));
            diagnostics.extend(self.history_diagnostic(&result, &component.molar_percent));
            validated_components.push(checked);
            component_results.push(result);
        }

        let mut validated_properties = Vec::with_capacity(properties.len());
        let mut property_results = Vec::with_capacity(properties.len());
        for property in properties {
            let parameter = Parameter::Property(property.id);
            let result = self.evaluate(&parameter, &property.value, history);

            let mut checked = property.clone();
            apply_limits(
                &result,
                &mut checked.cep_lower_limit,
                &mut checked.cep_upper_limit,
            );
            checked.cep_status = result.status;

            items.push(self.status_item(&result, &property.value));
            diagnostics.extend(self.history_diagnostic(&result, &property.value));
            validated_properties.push(checked);
            property_results.push(result);
        }

        SpcAssessment {
            components: validated_components,
            properties: validated_properties,
            component_results,
            property_results,
            reference_status: aggregate_cep(&items),
            diagnostics,
        }
    }

    fn status_item(&self, result: &ValidationResult, current: &Reading) -> StatusItem {
        StatusItem {
            status: result.status,
            has_input: !current.is_blank(),
            is_positive: current.is_positive(),
        }
    }

    fn history_diagnostic(&self, result: &ValidationResult, current: &Reading) -> Option<Diagnostic> {
        let required = self.config.min_history.max(2);
        (current.value().is_some() && result.statistics.sample_count < required).then(|| {
            Diagnostic::InsufficientHistory {
                parameter: result.parameter_name.clone(),
                available: result.statistics.sample_count,
                required,
            }
        })
    }
}

/// Limits are only meaningful once there is some history to compute them from.
fn apply_limits(result: &ValidationResult, lower: &mut Option<f64>, upper: &mut Option<f64>) {
    if result.statistics.sample_count == 0 {
        *lower = None;
        *upper = None;
    } else {
        *lower = Some(result.statistics.lower_control_limit);
        *upper = Some(result.statistics.upper_control_limit);
    }
}
