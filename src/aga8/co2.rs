//! Dynamic CO₂ ceiling.
//!
//! The static CO₂ maximum only holds for lean gas. Higher nitrogen or heavier
//! hydrocarbons tighten it; each rule can only lower the ceiling.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog;
use crate::sample::Component;

/// A tightening rule that fired for the current composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeilingRule {
    /// N₂ > 15% caps CO₂ at 10%.
    NitrogenAbove15,
    /// 7% < N₂ ≤ 15% caps CO₂ at 20%.
    NitrogenAbove7,
    /// C₃ > 2% caps CO₂ at 5%.
    PropaneAbove2,
    /// 1% < C₃ ≤ 2% caps CO₂ at 7%.
    PropaneAbove1,
    /// i-C₄ > 0.1% caps CO₂ at 10%.
    IsoButaneAbove0_1,
    /// n-C₄ > 0.3% caps CO₂ at 10%.
    NormalButaneAbove0_3,
}

impl CeilingRule {
    /// CO₂ limit imposed by the rule, in percent.
    pub fn limit(self) -> f64 {
        match self {
            CeilingRule::NitrogenAbove15 => 10.0,
            CeilingRule::NitrogenAbove7 => 20.0,
            CeilingRule::PropaneAbove2 => 5.0,
            CeilingRule::PropaneAbove1 => 7.0,
            CeilingRule::IsoButaneAbove0_1 => 10.0,
            CeilingRule::NormalButaneAbove0_3 => 10.0,
        }
    }
}

impl fmt::Display for CeilingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CeilingRule::NitrogenAbove15 => "N2 > 15%",
            CeilingRule::NitrogenAbove7 => "N2 > 7%",
            CeilingRule::PropaneAbove2 => "C3 > 2%",
            CeilingRule::PropaneAbove1 => "C3 > 1%",
            CeilingRule::IsoButaneAbove0_1 => "i-C4 > 0.1%",
            CeilingRule::NormalButaneAbove0_3 => "n-C4 > 0.3%",
        };
        write!(f, "{} (CO2 <= {:.1}%)", text, self.limit())
    }
}

/// Concentrations the ceiling depends on, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CeilingInputs {
    pub nitrogen: Option<f64>,
    pub propane: Option<f64>,
    pub iso_butane: Option<f64>,
    pub normal_butane: Option<f64>,
}

impl CeilingInputs {
    pub fn from_components(components: &[Component]) -> Self {
        let value = |key: &str| {
            components
                .iter()
                .find(|c| c.canonical_key() == Some(key))
                .and_then(|c| c.molar_percent.value())
        };

        Self {
            nitrogen: value(catalog::NITROGEN),
            propane: value(catalog::PROPANE),
            iso_butane: value(catalog::ISO_BUTANE),
            normal_butane: value(catalog::N_BUTANE),
        }
    }
}

/// The effective CO₂ ceiling and the rules that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Co2Ceiling {
    pub static_max: f64,
    pub value: f64,
    /// Every rule that fired, whether or not it ended up binding.
    pub applied_rules: Vec<CeilingRule>,
}

impl Co2Ceiling {
    pub fn is_tightened(&self) -> bool {
        self.value < self.static_max
    }
}

/// Rules triggered by the composition. Within the N₂ and C₃ pairs only the
/// stricter band fires.
pub fn triggered_rules(inputs: &CeilingInputs) -> Vec<CeilingRule> {
    let mut rules = Vec::new();

    match inputs.nitrogen {
        Some(n2) if n2 > 15.0 => rules.push(CeilingRule::NitrogenAbove15),
        Some(n2) if n2 > 7.0 => rules.push(CeilingRule::NitrogenAbove7),
        _ => {}
    }

    match inputs.propane {
        Some(c3) if c3 > 2.0 => rules.push(CeilingRule::PropaneAbove2),
        Some(c3) if c3 > 1.0 => rules.push(CeilingRule::PropaneAbove1),
        _ => {}
    }

    if inputs.iso_butane.is_some_and(|v| v > 0.1) {
        rules.push(CeilingRule::IsoButaneAbove0_1);
    }

    if inputs.normal_butane.is_some_and(|v| v > 0.3) {
        rules.push(CeilingRule::NormalButaneAbove0_3);
    }

    rules
}

/// Minimum of the static maximum and every triggered rule.
pub fn co2_ceiling(static_max: f64, inputs: &CeilingInputs) -> Co2Ceiling {
    let applied_rules = triggered_rules(inputs);
    let value = applied_rules
        .iter()
        .map(|rule| rule.limit())
        .fold(static_max, f64::min);

    Co2Ceiling {
        static_max,
        value,
        applied_rules,
    }
}
