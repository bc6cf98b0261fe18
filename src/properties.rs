//! Derived gas properties.
//!
//! Pure numeric functions over composition and reference conditions. Every
//! function is total: invalid input yields `0.0` ("not computable") instead of
//! an error.

use tracing::{debug, warn};

use crate::catalog;
use crate::diagnostics::Diagnostic;
use crate::reading::Reading;
use crate::sample::{Component, PropertyId, Sample, SampleProperty};

/// Molar mass of dry air, g/mol.
pub const AIR_MOLAR_MASS: f64 = 28.9625;
/// Universal gas constant, J/(mol·K).
pub const GAS_CONSTANT: f64 = 8.314;
/// Reference pressure, kPa.
pub const STANDARD_PRESSURE_KPA: f64 = 101.325;
/// Reference temperature, K (20 °C).
pub const STANDARD_TEMPERATURE_K: f64 = 293.15;
/// Ratio of lower to higher heating value assumed for natural gas.
pub const LHV_FACTOR: f64 = 0.9;

/// Pressure and temperature at which densities are reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceConditions {
    pub pressure_kpa: f64,
    pub temperature_k: f64,
}

impl Default for ReferenceConditions {
    fn default() -> Self {
        Self {
            pressure_kpa: STANDARD_PRESSURE_KPA,
            temperature_k: STANDARD_TEMPERATURE_K,
        }
    }
}

/// Molar mass and the names of positive components missing from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct MolarMassBreakdown {
    pub molar_mass: f64,
    pub missing: Vec<String>,
}

/// Σ(xᵢ·Mᵢ) with xᵢ = percent / 100.
///
/// Blank, invalid and negative concentrations count as zero. Components not in
/// the reference table are logged and contribute zero.
pub fn molar_mass_breakdown(components: &[Component]) -> MolarMassBreakdown {
    let mut total = 0.0;
    let mut missing = Vec::new();

    for component in components {
        let fraction = component.molar_percent.value_or_zero().max(0.0) / 100.0;
        match catalog::molar_mass(&component.name) {
            Some(mass) => total += fraction * mass,
            None if fraction > 0.0 => {
                warn!(component = %component.name, "no molar mass in reference table");
                missing.push(component.name.clone());
            }
            None => {}
        }
    }

    MolarMassBreakdown {
        molar_mass: total,
        missing,
    }
}

pub fn molar_mass(components: &[Component]) -> f64 {
    molar_mass_breakdown(components).molar_mass
}

pub fn relative_density(molar_mass: f64) -> f64 {
    if !molar_mass.is_finite() || molar_mass <= 0.0 {
        return 0.0;
    }
    molar_mass / AIR_MOLAR_MASS
}

/// Ideal-gas density in kg/m³.
pub fn real_density(molar_mass: f64, pressure_kpa: f64, temperature_k: f64) -> f64 {
    if !(molar_mass > 0.0 && pressure_kpa > 0.0 && temperature_k > 0.0) {
        return 0.0;
    }
    (pressure_kpa * 1000.0 * molar_mass) / (GAS_CONSTANT * temperature_k * 1000.0)
}

/// Ideal-gas density at 101.325 kPa and 293.15 K.
pub fn real_density_at_standard(molar_mass: f64) -> f64 {
    real_density(molar_mass, STANDARD_PRESSURE_KPA, STANDARD_TEMPERATURE_K)
}

/// hhv / √rd, or zero when the relative density is not positive.
pub fn wobbe_index(higher_heating_value: f64, relative_density: f64) -> f64 {
    if !(relative_density > 0.0) || !higher_heating_value.is_finite() {
        return 0.0;
    }
    higher_heating_value / relative_density.sqrt()
}

pub fn lower_heating_value(higher_heating_value: f64) -> f64 {
    if !higher_heating_value.is_finite() {
        return 0.0;
    }
    LHV_FACTOR * higher_heating_value
}

/// Properties after derivation, with any findings raised on the way.
#[derive(Debug, Clone)]
pub struct DerivedProperties {
    pub properties: Vec<SampleProperty>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DerivedProperties {
    pub fn value(&self, id: PropertyId) -> Option<f64> {
        self.properties
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| p.value.value())
    }
}

/// Fill blank or zero properties from composition and calorific value.
///
/// User-supplied values are never replaced. Compressibility factor and
/// calorific value are never computed.
pub fn derive_properties(sample: &Sample, reference: &ReferenceConditions) -> DerivedProperties {
    let mut properties = sample.properties.clone();
    let mut diagnostics = Vec::new();

    for property in &properties {
        if let Reading::Invalid(raw) = &property.value {
            diagnostics.push(Diagnostic::InvalidNumeric {
                field: property.id.key().to_string(),
                raw: raw.clone(),
            });
        }
    }

    let breakdown = molar_mass_breakdown(&sample.components);
    diagnostics.extend(
        breakdown
            .missing
            .iter()
            .map(|name| Diagnostic::MissingParameter {
                component: name.clone(),
            }),
    );

    let composed_mass = (sample.positive_component_count() > 0).then_some(breakdown.molar_mass);
    let mass = fill(&mut properties, PropertyId::MolarMass, || composed_mass);

    let rd = fill(&mut properties, PropertyId::RelativeDensity, || {
        mass.map(relative_density)
    });

    fill(&mut properties, PropertyId::RealDensity, || {
        mass.map(|m| real_density(m, reference.pressure_kpa, reference.temperature_k))
    });

    let hhv = current(&properties, PropertyId::CalorificValue).filter(|v| *v > 0.0);

    fill(&mut properties, PropertyId::WobbeIndex, || match (hhv, rd) {
        (Some(h), Some(d)) => Some(wobbe_index(h, d)),
        _ => None,
    });

    fill(&mut properties, PropertyId::LowerCalorificValue, || {
        hhv.map(lower_heating_value)
    });

    DerivedProperties {
        properties,
        diagnostics,
    }
}

fn current(properties: &[SampleProperty], id: PropertyId) -> Option<f64> {
    properties
        .iter()
        .find(|p| p.id == id)
        .and_then(|p| p.value.value())
}

/// Compute `id` when it is missing, blank or zero, and return the value in effect.
fn fill(
    properties: &mut Vec<SampleProperty>,
    id: PropertyId,
    compute: impl FnOnce() -> Option<f64>,
) -> Option<f64> {
    let existing = properties.iter().position(|p| p.id == id);

    if let Some(idx) = existing {
        if !properties[idx].value.is_blank_or_zero() {
            return properties[idx].value.value().filter(|v| *v > 0.0);
        }
    }

    let computed = compute().filter(|v| v.is_finite() && *v > 0.0)?;
    debug!(property = id.key(), value = computed, "derived property");

    let derived = SampleProperty::computed(id, computed);
    match existing {
        Some(idx) => properties[idx] = derived,
        None => properties.push(derived),
    }
    Some(computed)
}
