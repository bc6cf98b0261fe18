//! Measured or derived physical properties of a sample.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reading::Reading;
use crate::status::ValidationStatus;

/// Physical properties tracked on a bulletin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyId {
    /// g/mol
    MolarMass,
    /// Dimensionless, relative to dry air.
    RelativeDensity,
    /// kg/m³ at reference conditions.
    RealDensity,
    CompressibilityFactor,
    /// Higher (superior) calorific value, MJ/m³.
    CalorificValue,
    /// MJ/m³
    WobbeIndex,
    /// Lower (inferior) calorific value, MJ/m³.
    LowerCalorificValue,
}

impl PropertyId {
    pub const ALL: [PropertyId; 7] = [
        PropertyId::MolarMass,
        PropertyId::RelativeDensity,
        PropertyId::RealDensity,
        PropertyId::CompressibilityFactor,
        PropertyId::CalorificValue,
        PropertyId::WobbeIndex,
        PropertyId::LowerCalorificValue,
    ];

    /// Stable key used in historical samples.
    pub fn key(self) -> &'static str {
        match self {
            PropertyId::MolarMass => "molar_mass",
            PropertyId::RelativeDensity => "relative_density",
            PropertyId::RealDensity => "real_density",
            PropertyId::CompressibilityFactor => "compressibility_factor",
            PropertyId::CalorificValue => "calorific_value",
            PropertyId::WobbeIndex => "wobbe_index",
            PropertyId::LowerCalorificValue => "lower_calorific_value",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyId::MolarMass => "Molar mass",
            PropertyId::RelativeDensity => "Relative density",
            PropertyId::RealDensity => "Real density",
            PropertyId::CompressibilityFactor => "Compressibility factor",
            PropertyId::CalorificValue => "Calorific value",
            PropertyId::WobbeIndex => "Wobbe index",
            PropertyId::LowerCalorificValue => "Lower calorific value",
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Where a property value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyOrigin {
    #[default]
    Measured,
    Computed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleProperty {
    pub id: PropertyId,
    #[serde(default)]
    pub value: Reading,
    #[serde(default)]
    pub origin: PropertyOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep_lower_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep_upper_limit: Option<f64>,
    #[serde(default)]
    pub cep_status: ValidationStatus,
}

impl SampleProperty {
    pub fn new(id: PropertyId, value: Reading) -> Self {
        Self {
            id,
            value,
            origin: PropertyOrigin::Measured,
            cep_lower_limit: None,
            cep_upper_limit: None,
            cep_status: ValidationStatus::default(),
        }
    }

    pub fn computed(id: PropertyId, value: f64) -> Self {
        Self {
            origin: PropertyOrigin::Computed,
            ..Self::new(id, Reading::from_f64(value))
        }
    }

    pub fn has_input(&self) -> bool {
        !self.value.is_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for id in PropertyId::ALL {
            assert_eq!(PropertyId::from_key(id.key()), Some(id));
        }
        assert_eq!(PropertyId::from_key("viscosity"), None);
    }

    #[test]
    fn test_serde_key_matches() {
        let json = serde_json::to_string(&PropertyId::WobbeIndex).unwrap();
        assert_eq!(json, "\"wobbe_index\"");
    }
}
