//! Runs every validator over a sample and assembles the bulletin report.
//!
//! Data flow: sample → property derivation → {AGA-8, SPC} → reference
//! statuses. The deadline rules run independently on the same sample.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aga8::{self, select_method, Co2Ceiling, MethodInputs, MethodSelection};
use crate::clock::Clock;
use crate::config::Config;
use crate::deadline::{DateValidationDetails, DeadlineValidator};
use crate::diagnostics::Diagnostic;
use crate::properties::derive_properties;
use crate::repository::HistoricalSampleStore;
use crate::sample::{Component, HistoricalSample, PropertyId, Sample, SampleProperty};
use crate::spc::{SpcEngine, ValidationResult};
use crate::status::ValidationStatus;

/// Everything the caller needs to present a validated bulletin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletinReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulletin_id: Option<String>,
    /// Components with AGA-8 and CEP statuses and limits filled in.
    pub components: Vec<Component>,
    /// Measured and derived properties with CEP statuses and limits filled in.
    pub properties: Vec<SampleProperty>,
    pub component_results: Vec<ValidationResult>,
    pub property_results: Vec<ValidationResult>,
    pub reference_aga8_status: ValidationStatus,
    pub reference_cep_status: ValidationStatus,
    pub co2_ceiling: Co2Ceiling,
    pub method: MethodSelection,
    pub dates: DateValidationDetails,
    pub diagnostics: Vec<Diagnostic>,
}

impl BulletinReport {
    pub fn date_status(&self) -> ValidationStatus {
        self.dates.overall()
    }

    /// Worst of the three rule sets: OutOfRange, then Pending, then OK.
    pub fn overall_status(&self) -> ValidationStatus {
        let statuses = [
            self.reference_aga8_status,
            self.reference_cep_status,
            self.date_status(),
        ];
        if statuses.iter().any(|s| s.is_out_of_range()) {
            ValidationStatus::OutOfRange
        } else if statuses.iter().any(|s| s.is_pending()) {
            ValidationStatus::Pending
        } else if statuses.iter().any(|s| s.is_ok()) {
            ValidationStatus::Ok
        } else {
            ValidationStatus::NotApplicable
        }
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        let key = crate::catalog::canonical_key(name);
        self.components
            .iter()
            .find(|c| c.name == name || (key.is_some() && c.canonical_key() == key))
    }

    pub fn property(&self, id: PropertyId) -> Option<&SampleProperty> {
        self.properties.iter().find(|p| p.id == id)
    }
}

/// Wires the validators together under one configuration.
#[derive(Debug, Clone)]
pub struct ValidationOrchestrator {
    config: Config,
    spc: SpcEngine,
    deadlines: DeadlineValidator,
}

impl Default for ValidationOrchestrator {
    fn default() -> Self {
        Self {
            config: Config::default(),
            spc: SpcEngine::default(),
            deadlines: DeadlineValidator::default(),
        }
    }
}

impl ValidationOrchestrator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let deadlines = DeadlineValidator::new(config.deadlines.clone())?;
        let spc = SpcEngine::new(config.spc.clone());
        Ok(Self {
            config,
            spc,
            deadlines,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn deadlines(&self) -> &DeadlineValidator {
        &self.deadlines
    }

    /// Validate against a snapshot of the store.
    ///
    /// The store is read once up front; it is never written.
    pub fn validate(
        &self,
        sample: &Sample,
        store: &dyn HistoricalSampleStore,
        clock: &dyn Clock,
    ) -> Result<BulletinReport> {
        let history = store
            .read_all()
            .context("Failed to read historical samples")?;
        Ok(self.validate_with_history(sample, &history, clock))
    }

    /// Validate against an in-memory history, most recent first or in any order.
    pub fn validate_with_history(
        &self,
        sample: &Sample,
        history: &[HistoricalSample],
        clock: &dyn Clock,
    ) -> BulletinReport {
        let bulletin = sample.bulletin_id.as_deref().unwrap_or("<unnamed>");
        debug!(bulletin, history = history.len(), "validating bulletin");

        let mut diagnostics = component_diagnostics(sample);

        let derived = derive_properties(sample, &self.config.reference_conditions());
        diagnostics.extend(derived.diagnostics.iter().cloned());

        let aga8 = aga8::validate_components(&sample.components);

        let method = select_method(
            &MethodInputs {
                positive_components: sample.positive_component_count(),
                pressure_kpa: sample.conditions.pressure_kpa.value(),
                temperature_c: sample.conditions.temperature_c.value(),
                calorific_value: derived.value(PropertyId::CalorificValue),
                relative_density: derived.value(PropertyId::RelativeDensity),
            },
            self.config.composition.detailed_min_components,
        );

        let spc = self
            .spc
            .assess(&aga8.components, &derived.properties, history);
        diagnostics.extend(spc.diagnostics);

        diagnostics.extend(self.balance_check(sample));

        let dates = self.deadlines.validate(sample, clock);

        for diagnostic in &diagnostics {
            match diagnostic {
                Diagnostic::InsufficientHistory { .. } => debug!(bulletin, "{}", diagnostic),
                // Already reported by the molar mass calculation.
                Diagnostic::MissingParameter { .. } => {}
                _ => warn!(bulletin, "{}", diagnostic),
            }
        }

        let report = BulletinReport {
            bulletin_id: sample.bulletin_id.clone(),
            components: spc.components,
            properties: spc.properties,
            component_results: spc.component_results,
            property_results: spc.property_results,
            reference_aga8_status: aga8.reference_status,
            reference_cep_status: spc.reference_status,
            co2_ceiling: aga8.co2_ceiling,
            method,
            dates,
            diagnostics,
        };

        info!(
            bulletin,
            aga8 = %report.reference_aga8_status,
            cep = %report.reference_cep_status,
            dates = %report.date_status(),
            "bulletin validated"
        );

        report
    }

    /// Warn when the composition does not add up to 100%.
    fn balance_check(&self, sample: &Sample) -> Option<Diagnostic> {
        if sample.positive_component_count() == 0 {
            return None;
        }

        let tolerance = self.config.composition.balance_tolerance_percent;
        let total = sample.total_concentration();
        // Rounded to cancel float noise in sums like 99.9 + 0.1 + 0.1.
        let deviation = ((total - 100.0).abs() * 1e9).round() / 1e9;
        (deviation > tolerance).then_some(Diagnostic::CompositionImbalance { total, tolerance })
    }
}

fn component_diagnostics(sample: &Sample) -> Vec<Diagnostic> {
    sample
        .components
        .iter()
        .filter_map(|c| {
            c.molar_percent
                .invalid_raw()
                .map(|raw| Diagnostic::InvalidNumeric {
                    field: c.name.clone(),
                    raw: raw.to_string(),
                })
        })
        .collect()
}
