//! Individuals/moving-range control limits.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reading::Reading;
use crate::status::ValidationStatus;

/// Unbiasing constant d₂ for moving ranges of two consecutive points.
pub const D2_SUBGROUP_OF_TWO: f64 = 1.128;

/// How recorded history values relate to the unit of the current reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPolicy {
    /// A window recorded as fractions is rescaled ×100 when the current
    /// reading is on the percent scale.
    ///
    /// Decided per window: every value must lie in [0, 1) and the rescaled
    /// mean must sit closer to the current reading than the raw mean. Steady
    /// trace components recorded in percent stay as they are.
    #[default]
    FractionToPercent,
    /// Values are used as recorded.
    AsRecorded,
}

/// Bring a history window onto the scale of the current reading.
///
/// Without a current value there is nothing to compare against and the
/// window is returned as recorded.
pub fn normalize(values: &[f64], policy: UnitPolicy, current: Option<f64>) -> Vec<f64> {
    let Some(current) = current else {
        return values.to_vec();
    };
    if policy == UnitPolicy::AsRecorded || !is_fractional(values) {
        return values.to_vec();
    }

    let raw_mean = mean(values);
    let scaled_mean = raw_mean * 100.0;
    if (scaled_mean - current).abs() >= (raw_mean - current).abs() {
        return values.to_vec();
    }

    debug!(
        count = values.len(),
        current,
        "rescaling fractional history window to percent"
    );
    values.iter().map(|v| v * 100.0).collect()
}

fn is_fractional(values: &[f64]) -> bool {
    values.iter().any(|v| *v > 0.0) && values.iter().all(|v| (0.0..1.0).contains(v))
}

/// |v[i] − v[i−1]| for each consecutive pair.
pub fn moving_ranges(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Statistics reported alongside every SPC classification.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlStatistics {
    pub mean: f64,
    pub mean_moving_range: f64,
    pub lower_control_limit: f64,
    pub upper_control_limit: f64,
    pub sample_count: usize,
}

/// Compute limits as mean ± k·MR̄/d₂, with the lower limit floored at zero.
///
/// An empty window yields all zeros; a single value yields zero-width limits.
pub fn control_statistics(values: &[f64], sigma_multiplier: f64, d2: f64) -> ControlStatistics {
    let mean = mean(values);
    let ranges = moving_ranges(values);
    let mean_moving_range = mean_of_ranges(&ranges);

    let offset = if d2 > 0.0 {
        sigma_multiplier * mean_moving_range / d2
    } else {
        0.0
    };

    ControlStatistics {
        mean,
        mean_moving_range,
        lower_control_limit: (mean - offset).max(0.0),
        upper_control_limit: mean + offset,
        sample_count: values.len(),
    }
}

fn mean_of_ranges(ranges: &[f64]) -> f64 {
    if ranges.is_empty() {
        0.0
    } else {
        mean(ranges)
    }
}

/// Classify the current reading against control limits.
///
/// - Blank reading: NotApplicable (nothing to classify)
/// - Unparsable reading or fewer than `min_history` values: Pending
/// - Otherwise OK inside `[LCL, UCL]`, OutOfRange outside
pub fn classify(
    current: &Reading,
    statistics: &ControlStatistics,
    min_history: usize,
) -> ValidationStatus {
    let value = match current {
        Reading::Blank => return ValidationStatus::NotApplicable,
        Reading::Invalid(_) => return ValidationStatus::Pending,
        Reading::Value(v) => *v,
    };

    if statistics.sample_count < min_history.max(2) {
        return ValidationStatus::Pending;
    }

    if value >= statistics.lower_control_limit && value <= statistics.upper_control_limit {
        ValidationStatus::Ok
    } else {
        ValidationStatus::OutOfRange
    }
}
