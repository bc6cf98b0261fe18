//! AGA-8 compliance: per-component bounds and method selection.

mod co2;
mod method;

pub use co2::{co2_ceiling, triggered_rules, CeilingInputs, CeilingRule, Co2Ceiling};
pub use method::{
    select_method, Aga8Method, MethodInputs, MethodSelection, DEFAULT_DETAILED_MIN_COMPONENTS,
    DETAILED_MAX_PRESSURE_KPA, DETAILED_MAX_TEMPERATURE_C, DETAILED_MIN_TEMPERATURE_C,
    WIDE_RANGE_MAX_PRESSURE_KPA, WIDE_RANGE_MAX_TEMPERATURE_C, WIDE_RANGE_MIN_TEMPERATURE_C,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog;
use crate::sample::Component;
use crate::status::{aggregate_aga8, StatusItem, ValidationStatus};

/// Bounds actually applied to one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBounds {
    pub min: f64,
    pub effective_max: f64,
}

/// AGA-8 outcome for a set of components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aga8Assessment {
    /// Components with `aga8_status` filled in.
    pub components: Vec<Component>,
    /// Bounds per component, `None` where the component has no reference bounds.
    pub bounds: Vec<Option<ComponentBounds>>,
    pub co2_ceiling: Co2Ceiling,
    pub reference_status: ValidationStatus,
}

/// Classify one concentration against its bounds.
///
/// Pending when absent or unparsable; NotApplicable when no bounds are known.
pub fn classify(concentration: Option<f64>, bounds: Option<&ComponentBounds>) -> ValidationStatus {
    let Some(value) = concentration else {
        return ValidationStatus::Pending;
    };
    let Some(bounds) = bounds else {
        return ValidationStatus::NotApplicable;
    };

    if value >= bounds.min && value <= bounds.effective_max {
        ValidationStatus::Ok
    } else {
        ValidationStatus::OutOfRange
    }
}

/// Static CO₂ maximum for the sample: per-sample override, else the table.
fn co2_static_max(components: &[Component]) -> f64 {
    components
        .iter()
        .find(|c| c.canonical_key() == Some(catalog::CARBON_DIOXIDE))
        .and_then(|c| c.static_bounds())
        .map(|(_, max)| max)
        .or_else(|| catalog::lookup(catalog::CARBON_DIOXIDE).map(|entry| entry.aga8_max))
        .unwrap_or(f64::INFINITY)
}

/// Validate every component against its static or dynamically tightened bounds.
pub fn validate_components(components: &[Component]) -> Aga8Assessment {
    let ceiling = co2_ceiling(
        co2_static_max(components),
        &CeilingInputs::from_components(components),
    );
    if ceiling.is_tightened() {
        debug!(
            ceiling = ceiling.value,
            rules = ceiling.applied_rules.len(),
            "CO2 ceiling tightened"
        );
    }

    let mut validated = Vec::with_capacity(components.len());
    let mut bounds = Vec::with_capacity(components.len());
    let mut items = Vec::with_capacity(components.len());

    for component in components {
        let component_bounds = component.static_bounds().map(|(min, max)| {
            let effective_max = if component.canonical_key() == Some(catalog::CARBON_DIOXIDE) {
                ceiling.value
            } else {
                max
            };
            ComponentBounds { min, effective_max }
        });

        let status = classify(component.molar_percent.value(), component_bounds.as_ref());

        items.push(StatusItem {
            status,
            has_input: component.has_input(),
            is_positive: component.molar_percent.is_positive(),
        });

        let mut checked = component.clone();
        checked.aga8_status = status;
        validated.push(checked);
        bounds.push(component_bounds);
    }

    Aga8Assessment {
        components: validated,
        bounds,
        co2_ceiling: ceiling,
        reference_status: aggregate_aga8(&items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;

    fn component(name: &str, value: f64) -> Component {
        Component::new(name, Reading::Value(value))
    }

    fn status_of(assessment: &Aga8Assessment, name: &str) -> ValidationStatus {
        assessment
            .components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.aga8_status)
            .unwrap()
    }

    #[test]
    fn test_co2_ceiling_tightened_by_nitrogen() {
        let components = vec![
            component("methane", 72.0),
            component("nitrogen", 16.0),
            component("carbon_dioxide", 12.0),
        ];
        let assessment = validate_components(&components);
        assert_eq!(assessment.co2_ceiling.static_max, 30.0);
        assert_eq!(assessment.co2_ceiling.value, 10.0);
        assert_eq!(
            status_of(&assessment, "carbon_dioxide"),
            ValidationStatus::OutOfRange
        );
        assert_eq!(status_of(&assessment, "nitrogen"), ValidationStatus::Ok);
        assert_eq!(assessment.reference_status, ValidationStatus::OutOfRange);
    }

    #[test]
    fn test_within_bounds() {
        let components = vec![
            component("methane", 90.0),
            component("ethane", 6.0),
            component("CO2", 2.0),
            component("N2", 2.0),
        ];
        let assessment = validate_components(&components);
        assert!(assessment.components.iter().all(|c| c.aga8_status.is_ok()));
        assert_eq!(assessment.reference_status, ValidationStatus::Ok);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let components = vec![component("methane", 45.0), component("propane", 3.5)];
        let assessment = validate_components(&components);
        assert_eq!(assessment.reference_status, ValidationStatus::Ok);
    }

    #[test]
    fn test_below_min_is_out_of_range() {
        let assessment = validate_components(&[component("methane", 40.0)]);
        assert_eq!(status_of(&assessment, "methane"), ValidationStatus::OutOfRange);
    }

    #[test]
    fn test_invalid_input_is_pending() {
        let components = vec![
            component("methane", 95.0),
            Component::new("ethane", Reading::Invalid("abc".into())),
            Component::new("propane", Reading::Blank),
        ];
        let assessment = validate_components(&components);
        assert_eq!(status_of(&assessment, "ethane"), ValidationStatus::Pending);
        assert_eq!(status_of(&assessment, "propane"), ValidationStatus::Pending);
        assert_eq!(assessment.reference_status, ValidationStatus::Pending);
    }

    #[test]
    fn test_blank_components_do_not_block() {
        let components = vec![
            component("methane", 95.0),
            Component::new("propane", Reading::Blank),
        ];
        let assessment = validate_components(&components);
        assert_eq!(assessment.reference_status, ValidationStatus::Ok);
    }

    #[test]
    fn test_per_sample_override() {
        let components = vec![
            component("methane", 95.0),
            component("ethane", 4.0).with_aga8_max(3.0),
        ];
        let assessment = validate_components(&components);
        assert_eq!(status_of(&assessment, "ethane"), ValidationStatus::OutOfRange);
    }

    #[test]
    fn test_co2_override_is_still_tightened() {
        let components = vec![
            component("nitrogen", 8.0),
            component("CO2", 15.0).with_aga8_max(12.0),
        ];
        let assessment = validate_components(&components);
        assert_eq!(assessment.co2_ceiling.static_max, 12.0);
        assert_eq!(assessment.co2_ceiling.value, 12.0);
        assert_eq!(status_of(&assessment, "CO2"), ValidationStatus::OutOfRange);
    }

    #[test]
    fn test_unknown_component_not_applicable() {
        let components = vec![component("methane", 99.0), component("xenon", 1.0)];
        let assessment = validate_components(&components);
        assert_eq!(status_of(&assessment, "xenon"), ValidationStatus::NotApplicable);
        assert!(assessment.bounds[1].is_none());
        assert_eq!(assessment.reference_status, ValidationStatus::Ok);
    }

    #[test]
    fn test_empty_is_not_applicable() {
        let assessment = validate_components(&[]);
        assert_eq!(assessment.reference_status, ValidationStatus::NotApplicable);
    }
}
