//! AGA-8 characterization method selection.
//!
//! This is an annotation, not a gate: several methods can be valid for the
//! same sample and the selector reports the most specific one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detailed characterization envelope.
pub const DETAILED_MIN_TEMPERATURE_C: f64 = -4.0;
pub const DETAILED_MAX_TEMPERATURE_C: f64 = 62.0;
pub const DETAILED_MAX_PRESSURE_KPA: f64 = 10_342.0;

/// Wide-range equation of state envelope.
pub const WIDE_RANGE_MIN_TEMPERATURE_C: f64 = -160.0;
pub const WIDE_RANGE_MAX_TEMPERATURE_C: f64 = 200.0;
pub const WIDE_RANGE_MAX_PRESSURE_KPA: f64 = 70_000.0;

/// Components with positive concentration needed for a complete analysis.
pub const DEFAULT_DETAILED_MIN_COMPONENTS: usize = 10;

/// Methods in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aga8Method {
    DetailedCharacterization,
    GrossCharacterization,
    WideRangeEquationOfState,
}

impl fmt::Display for Aga8Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aga8Method::DetailedCharacterization => write!(f, "Detailed Characterization"),
            Aga8Method::GrossCharacterization => write!(f, "Gross Characterization"),
            Aga8Method::WideRangeEquationOfState => write!(f, "Wide-range equation of state"),
        }
    }
}

/// What the selector needs to know about a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MethodInputs {
    pub positive_components: usize,
    pub pressure_kpa: Option<f64>,
    pub temperature_c: Option<f64>,
    pub calorific_value: Option<f64>,
    pub relative_density: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSelection {
    /// Most specific applicable method, `None` when data is insufficient.
    pub selected: Option<Aga8Method>,
    /// Every method whose preconditions hold, in precedence order.
    pub applicable: Vec<Aga8Method>,
    pub reason: String,
}

impl MethodSelection {
    pub fn is_insufficient(&self) -> bool {
        self.selected.is_none()
    }
}

fn within(value: Option<f64>, min: f64, max: f64) -> bool {
    value.is_some_and(|v| v >= min && v <= max)
}

fn detailed_applies(inputs: &MethodInputs, min_components: usize) -> bool {
    inputs.positive_components >= min_components
        && within(
            inputs.temperature_c,
            DETAILED_MIN_TEMPERATURE_C,
            DETAILED_MAX_TEMPERATURE_C,
        )
        && within(inputs.pressure_kpa, 0.0, DETAILED_MAX_PRESSURE_KPA)
}

fn gross_applies(inputs: &MethodInputs) -> bool {
    inputs.calorific_value.is_some_and(|v| v > 0.0)
        && inputs.relative_density.is_some_and(|v| v > 0.0)
}

fn wide_range_applies(inputs: &MethodInputs) -> bool {
    inputs.positive_components > 0
        && within(
            inputs.temperature_c,
            WIDE_RANGE_MIN_TEMPERATURE_C,
            WIDE_RANGE_MAX_TEMPERATURE_C,
        )
        && within(inputs.pressure_kpa, 0.0, WIDE_RANGE_MAX_PRESSURE_KPA)
}

/// Pick Detailed > Gross > wide-range, or report insufficient data.
pub fn select_method(inputs: &MethodInputs, detailed_min_components: usize) -> MethodSelection {
    let mut applicable = Vec::new();
    if detailed_applies(inputs, detailed_min_components) {
        applicable.push(Aga8Method::DetailedCharacterization);
    }
    if gross_applies(inputs) {
        applicable.push(Aga8Method::GrossCharacterization);
    }
    if wide_range_applies(inputs) {
        applicable.push(Aga8Method::WideRangeEquationOfState);
    }

    let selected = applicable.first().copied();
    let reason = match selected {
        Some(Aga8Method::DetailedCharacterization) => format!(
            "{} components analysed; conditions within {}..{} °C and <= {} kPa",
            inputs.positive_components,
            DETAILED_MIN_TEMPERATURE_C,
            DETAILED_MAX_TEMPERATURE_C,
            DETAILED_MAX_PRESSURE_KPA
        ),
        Some(Aga8Method::GrossCharacterization) => {
            "Calorific value and relative density known".to_string()
        }
        Some(Aga8Method::WideRangeEquationOfState) => format!(
            "Conditions within {}..{} °C and <= {} kPa",
            WIDE_RANGE_MIN_TEMPERATURE_C, WIDE_RANGE_MAX_TEMPERATURE_C, WIDE_RANGE_MAX_PRESSURE_KPA
        ),
        None => insufficient_reason(inputs, detailed_min_components),
    };

    MethodSelection {
        selected,
        applicable,
        reason,
    }
}

fn insufficient_reason(inputs: &MethodInputs, detailed_min_components: usize) -> String {
    let mut missing = Vec::new();
    if inputs.positive_components == 0 {
        missing.push("composition".to_string());
    } else if inputs.positive_components < detailed_min_components {
        missing.push(format!(
            "complete composition ({} of {} components)",
            inputs.positive_components, detailed_min_components
        ));
    }
    if inputs.pressure_kpa.is_none() {
        missing.push("pressure".to_string());
    }
    if inputs.temperature_c.is_none() {
        missing.push("temperature".to_string());
    }
    if inputs.calorific_value.is_none() {
        missing.push("calorific value".to_string());
    }
    if inputs.relative_density.is_none() {
        missing.push("relative density".to_string());
    }

    if missing.is_empty() {
        "Operating conditions outside every AGA-8 envelope".to_string()
    } else {
        format!("Insufficient data: missing {}", missing.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> MethodInputs {
        MethodInputs {
            positive_components: 12,
            pressure_kpa: Some(5_000.0),
            temperature_c: Some(25.0),
            calorific_value: Some(39.0),
            relative_density: Some(0.6),
        }
    }

    #[test]
    fn test_detailed_preferred_when_complete() {
        let selection = select_method(&full(), DEFAULT_DETAILED_MIN_COMPONENTS);
        assert_eq!(selection.selected, Some(Aga8Method::DetailedCharacterization));
        assert_eq!(
            selection.applicable,
            vec![
                Aga8Method::DetailedCharacterization,
                Aga8Method::GrossCharacterization,
                Aga8Method::WideRangeEquationOfState,
            ]
        );
    }

    #[test]
    fn test_incomplete_composition_falls_back_to_gross() {
        let inputs = MethodInputs {
            positive_components: 6,
            ..full()
        };
        let selection = select_method(&inputs, DEFAULT_DETAILED_MIN_COMPONENTS);
        assert_eq!(selection.selected, Some(Aga8Method::GrossCharacterization));
    }

    #[test]
    fn test_detailed_envelope_edges() {
        let cold = MethodInputs {
            temperature_c: Some(-4.0),
            pressure_kpa: Some(10_342.0),
            ..full()
        };
        assert_eq!(
            select_method(&cold, 10).selected,
            Some(Aga8Method::DetailedCharacterization)
        );

        let too_cold = MethodInputs {
            temperature_c: Some(-4.1),
            ..full()
        };
        assert_eq!(
            select_method(&too_cold, 10).selected,
            Some(Aga8Method::GrossCharacterization)
        );
    }

    #[test]
    fn test_wide_range_fallback() {
        let inputs = MethodInputs {
            pressure_kpa: Some(30_000.0),
            temperature_c: Some(-100.0),
            calorific_value: None,
            ..full()
        };
        let selection = select_method(&inputs, 10);
        assert_eq!(
            selection.selected,
            Some(Aga8Method::WideRangeEquationOfState)
        );
        assert_eq!(selection.applicable.len(), 1);
    }

    #[test]
    fn test_insufficient_data() {
        let selection = select_method(&MethodInputs::default(), 10);
        assert!(selection.is_insufficient());
        assert!(selection.applicable.is_empty());
        assert!(selection.reason.contains("composition"));
        assert!(selection.reason.contains("pressure"));
    }

    #[test]
    fn test_outside_every_envelope() {
        let inputs = MethodInputs {
            pressure_kpa: Some(80_000.0),
            calorific_value: Some(0.0),
            ..full()
        };
        let selection = select_method(&inputs, 10);
        assert!(selection.is_insufficient());
        assert!(selection.reason.contains("outside"));
    }
}
