use super::*;
use crate::spc::UnitPolicy;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_config() {
    let content = r#"---
spc:
  window: 10
  property_units: fraction_to_percent
deadlines:
  collection_to_issue_days: 20
---

# Laboratory settings
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.spc.window, 10);
    assert_eq!(config.spc.d2, 1.128); // default
    assert_eq!(config.spc.property_units, UnitPolicy::FractionToPercent);
    assert_eq!(config.deadlines.collection_to_issue_days, 20);
    assert_eq!(config.deadlines.total_process_days_normal, 28);
}

#[test]
fn test_parse_minimal_config() {
    let config = Config::parse("---\n{}\n---\n").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.spc.window, 8);
    assert_eq!(config.spc.min_history, 2);
    assert_eq!(config.spc.sigma_multiplier, 3.0);
    assert_eq!(config.spc.component_units, UnitPolicy::FractionToPercent);
    assert_eq!(config.spc.property_units, UnitPolicy::AsRecorded);
    assert_eq!(config.deadlines.total_process_days_without_validation, 26);
    assert_eq!(config.deadlines.resampling_business_days, 3);
    assert_eq!(config.deadlines.utc_offset, "-03:00");
    assert_eq!(config.reference.pressure_kpa, 101.325);
    assert_eq!(config.composition.detailed_min_components, 10);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_requires_frontmatter() {
    let result = Config::parse("spc:\n  window: 8\n");
    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_small_window() {
    let err = Config::parse("---\nspc:\n  window: 1\n  min_history: 1\n---\n").unwrap_err();
    assert!(format!("{:#}", err).contains("spc.window"));
}

#[test]
fn test_parse_rejects_min_history_above_window() {
    let err = Config::parse("---\nspc:\n  window: 4\n  min_history: 5\n---\n").unwrap_err();
    assert!(format!("{:#}", err).contains("spc.min_history"));
}

#[test]
fn test_parse_rejects_bad_offset() {
    let err = Config::parse("---\ndeadlines:\n  utc_offset: brasilia\n---\n").unwrap_err();
    assert!(format!("{:#}", err).contains("brasilia"));
}

#[test]
fn test_parse_rejects_non_positive_reference() {
    assert!(Config::parse("---\nreference:\n  pressure_kpa: 0\n---\n").is_err());
    assert!(Config::parse("---\nreference:\n  temperature_k: -1\n---\n").is_err());
}

#[test]
fn test_parse_rejects_negative_deadline() {
    let err =
        Config::parse("---\ndeadlines:\n  resampling_business_days: -1\n---\n").unwrap_err();
    assert!(format!("{:#}", err).contains("resampling_business_days"));
}

#[test]
fn test_load_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.md");
    fs::write(&path, "---\ncomposition:\n  balance_tolerance_percent: 0.5\n---\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.composition.balance_tolerance_percent, 0.5);
}

#[test]
fn test_load_from_missing_file() {
    let tmp = TempDir::new().unwrap();
    let err = Config::load_from(&tmp.path().join("absent.md")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn test_load_merged_no_files() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_merged_from(
        Some(&tmp.path().join("global.md")),
        &tmp.path().join("config.md"),
    )
    .unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_merged_project_overrides_global() {
    let tmp = TempDir::new().unwrap();
    let global_path = tmp.path().join("global.md");
    let project_path = tmp.path().join("config.md");

    fs::write(
        &global_path,
        r#"---
spc:
  window: 12
reference:
  temperature_k: 288.15
---
"#,
    )
    .unwrap();
    fs::write(
        &project_path,
        r#"---
spc:
  window: 6
---
"#,
    )
    .unwrap();

    let config = Config::load_merged_from(Some(&global_path), &project_path).unwrap();
    assert_eq!(config.spc.window, 6);
    assert_eq!(config.reference.temperature_k, 288.15);
    assert_eq!(config.reference.pressure_kpa, 101.325);
}

#[test]
fn test_load_merged_validates_result() {
    let tmp = TempDir::new().unwrap();
    let global_path = tmp.path().join("global.md");
    fs::write(&global_path, "---\nspc:\n  d2: 0\n---\n").unwrap();

    let result = Config::load_merged_from(Some(&global_path), &tmp.path().join("config.md"));
    assert!(result.is_err());
}

#[test]
fn test_reference_conditions() {
    let config = Config::parse("---\nreference:\n  temperature_k: 288.15\n---\n").unwrap();
    let reference = config.reference_conditions();
    assert_eq!(reference.temperature_k, 288.15);
    assert_eq!(reference.pressure_kpa, 101.325);
}
