//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

use crate::spc::UnitPolicy;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_window, usize, 8);
default_fn!(default_d2, f64, 1.128); // d2 for moving ranges of two points
default_fn!(default_sigma_multiplier, f64, 3.0);
default_fn!(default_min_history, usize, 2);
default_fn!(default_property_units, UnitPolicy, UnitPolicy::AsRecorded);
default_fn!(default_collection_to_issue_days, i64, 25);
default_fn!(default_total_process_days_normal, i64, 28);
default_fn!(default_total_process_days_without_validation, i64, 26);
default_fn!(default_resampling_business_days, i64, 3);
default_fn!(default_utc_offset, String, "-03:00".to_string()); // Brasília
default_fn!(default_pressure_kpa, f64, 101.325);
default_fn!(default_temperature_k, f64, 293.15); // 20 °C
default_fn!(default_balance_tolerance_percent, f64, 0.1);
default_fn!(default_detailed_min_components, usize, 10);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Statistical process control settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpcConfig {
    /// Number of most recent historical samples used (default: 8)
    #[serde(default = "default_window")]
    pub window: usize,
    /// Bias correction constant for the mean moving range (default: 1.128)
    #[serde(default = "default_d2")]
    pub d2: f64,
    /// Width of the control limits in sigmas (default: 3.0)
    #[serde(default = "default_sigma_multiplier")]
    pub sigma_multiplier: f64,
    /// Minimum number of historical values before limits are trusted (default: 2)
    #[serde(default = "default_min_history")]
    pub min_history: usize,
    /// How recorded component history relates to percent readings
    #[serde(default)]
    pub component_units: UnitPolicy,
    /// How recorded property history relates to current readings
    #[serde(default = "default_property_units")]
    pub property_units: UnitPolicy,
}

impl Default for SpcConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            d2: default_d2(),
            sigma_multiplier: default_sigma_multiplier(),
            min_history: default_min_history(),
            component_units: UnitPolicy::default(),
            property_units: default_property_units(),
        }
    }
}

/// Lifecycle deadline settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeadlineConfig {
    /// Calendar days allowed from collection to bulletin issue (default: 25)
    #[serde(default = "default_collection_to_issue_days")]
    pub collection_to_issue_days: i64,
    /// Calendar days from collection to implementation, normal process (default: 28)
    #[serde(default = "default_total_process_days_normal")]
    pub total_process_days_normal: i64,
    /// Calendar days from collection to implementation without validation (default: 26)
    #[serde(default = "default_total_process_days_without_validation")]
    pub total_process_days_without_validation: i64,
    /// Business days allowed between critical review and re-sampling (default: 3)
    #[serde(default = "default_resampling_business_days")]
    pub resampling_business_days: i64,
    /// Offset of the timezone calendar days are counted in (default: "-03:00")
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            collection_to_issue_days: default_collection_to_issue_days(),
            total_process_days_normal: default_total_process_days_normal(),
            total_process_days_without_validation: default_total_process_days_without_validation(),
            resampling_business_days: default_resampling_business_days(),
            utc_offset: default_utc_offset(),
        }
    }
}

/// Reference conditions for derived densities
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReferenceConfig {
    #[serde(default = "default_pressure_kpa")]
    pub pressure_kpa: f64,
    #[serde(default = "default_temperature_k")]
    pub temperature_k: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            pressure_kpa: default_pressure_kpa(),
            temperature_k: default_temperature_k(),
        }
    }
}

/// Composition-level checks
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompositionConfig {
    /// Allowed deviation of the component total from 100% (default: 0.1)
    #[serde(default = "default_balance_tolerance_percent")]
    pub balance_tolerance_percent: f64,
    /// Positive components required for the AGA-8 Detailed method (default: 10)
    #[serde(default = "default_detailed_min_components")]
    pub detailed_min_components: usize,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            balance_tolerance_percent: default_balance_tolerance_percent(),
            detailed_min_components: default_detailed_min_components(),
        }
    }
}
