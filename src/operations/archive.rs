//! Archive operation for validated samples.
//!
//! Produces the immutable [`HistoricalSample`] the caller appends to its
//! store. The engine never archives on its own.

use chrono::FixedOffset;
use std::fmt;
use tracing::debug;

use crate::properties::{derive_properties, ReferenceConditions};
use crate::sample::{HistoricalSample, Sample};

#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveError {
    MissingBulletinId,
    MissingCollectionDate,
    /// A concentration or property could not be parsed.
    InvalidValue { field: String, raw: String },
    /// No component or property carries a value.
    Empty,
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::MissingBulletinId => write!(f, "Sample has no bulletin id"),
            ArchiveError::MissingCollectionDate => write!(f, "Sample has no collection date"),
            ArchiveError::InvalidValue { field, raw } => {
                write!(f, "Cannot archive unparsable value '{}' for {}", raw, field)
            }
            ArchiveError::Empty => write!(f, "Sample has no values to archive"),
        }
    }
}

impl std::error::Error for ArchiveError {}

/// Build the historical record for a sample.
///
/// Blank readings are left out. Components are keyed canonically when known;
/// the collection day is taken in the reference timezone `offset`.
pub fn archive_sample(
    sample: &Sample,
    offset: FixedOffset,
) -> Result<HistoricalSample, ArchiveError> {
    let bulletin_id = sample
        .bulletin_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ArchiveError::MissingBulletinId)?;
    let collection = sample
        .dates
        .collection
        .as_ref()
        .ok_or(ArchiveError::MissingCollectionDate)?;

    let mut record = HistoricalSample::new(bulletin_id, collection.day_in(offset));

    for component in &sample.components {
        if let Some(raw) = component.molar_percent.invalid_raw() {
            return Err(ArchiveError::InvalidValue {
                field: component.name.clone(),
                raw: raw.to_string(),
            });
        }
        if let Some(value) = component.molar_percent.value() {
            record = record.with_component(&component.name, value);
        }
    }

    for property in &sample.properties {
        if let Some(raw) = property.value.invalid_raw() {
            return Err(ArchiveError::InvalidValue {
                field: property.id.key().to_string(),
                raw: raw.to_string(),
            });
        }
        if let Some(value) = property.value.value() {
            record = record.with_property(property.id, value);
        }
    }

    if record.components.is_empty() && record.properties.is_empty() {
        return Err(ArchiveError::Empty);
    }

    debug!(
        bulletin = %record.bulletin_id,
        components = record.components.len(),
        properties = record.properties.len(),
        "sample archived"
    );

    Ok(record)
}

/// Archive a sample together with the properties derived from its composition.
///
/// Validation always derives molar mass and densities before running SPC, so
/// the archived record has to carry them too or those parameters never gain
/// history.
pub fn archive_with_derived(
    sample: &Sample,
    reference: &ReferenceConditions,
    offset: FixedOffset,
) -> Result<HistoricalSample, ArchiveError> {
    let derived = derive_properties(sample, reference);
    let completed = Sample {
        properties: derived.properties,
        ..sample.clone()
    };
    archive_sample(&completed, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;
    use crate::sample::{Component, PropertyId, SampleProperty};
    use chrono::NaiveDate;

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn archivable() -> Sample {
        let mut sample = Sample {
            bulletin_id: Some("BOL-2024-031".to_string()),
            components: vec![
                Component::new("Methane", Reading::Value(91.2)),
                Component::new("CO2", Reading::Value(1.4)),
                Component::new("propane", Reading::Blank),
            ],
            properties: vec![SampleProperty::new(
                PropertyId::RelativeDensity,
                Reading::Value(0.61),
            )],
            ..Default::default()
        };
        sample.dates.collection = Some("2024-03-02T01:30:00Z".parse().unwrap());
        sample
    }

    #[test]
    fn test_archive_sample() {
        let record = archive_sample(&archivable(), brt()).unwrap();
        assert_eq!(record.bulletin_id, "BOL-2024-031");
        assert_eq!(
            record.collection_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(record.components.get("methane"), Some(&91.2));
        assert_eq!(record.components.get("carbon_dioxide"), Some(&1.4));
        assert!(!record.components.contains_key("propane"));
        assert_eq!(record.property_value(PropertyId::RelativeDensity), Some(0.61));
    }

    #[test]
    fn test_archive_requires_identity() {
        let mut sample = archivable();
        sample.bulletin_id = Some("  ".to_string());
        assert_eq!(
            archive_sample(&sample, brt()).unwrap_err(),
            ArchiveError::MissingBulletinId
        );

        let mut sample = archivable();
        sample.dates.collection = None;
        assert_eq!(
            archive_sample(&sample, brt()).unwrap_err(),
            ArchiveError::MissingCollectionDate
        );
    }

    #[test]
    fn test_archive_rejects_invalid_values() {
        let mut sample = archivable();
        sample.components[1].molar_percent = Reading::parse("1,4x");
        let err = archive_sample(&sample, brt()).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidValue { ref field, .. } if field == "CO2"));
        assert!(err.to_string().contains("1,4x"));
    }

    #[test]
    fn test_archive_rejects_empty_sample() {
        let mut sample = archivable();
        sample.components.clear();
        sample.properties.clear();
        assert_eq!(archive_sample(&sample, brt()).unwrap_err(), ArchiveError::Empty);
    }

    #[test]
    fn test_archive_with_derived_keeps_computed_properties() {
        let record =
            archive_with_derived(&archivable(), &ReferenceConditions::default(), brt()).unwrap();

        let molar_mass = record.property_value(PropertyId::MolarMass).unwrap();
        assert!((molar_mass - (0.912 * 16.043 + 0.014 * 44.01)).abs() < 1e-9);
        assert!(record.property_value(PropertyId::RealDensity).unwrap() > 0.0);
        // User-supplied values win over derived ones.
        assert_eq!(record.property_value(PropertyId::RelativeDensity), Some(0.61));
    }

    #[test]
    fn test_plain_archive_stores_only_entered_values() {
        let record = archive_sample(&archivable(), brt()).unwrap();
        assert_eq!(record.property_value(PropertyId::MolarMass), None);
    }
}
