//! Non-fatal findings raised while validating a bulletin.
//!
//! None of these stop validation. They are collected on the report so the
//! caller can decide what to show.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Component has no molar mass in the reference table; it contributed zero.
    MissingParameter { component: String },
    /// Entered value could not be parsed; treated as absent.
    InvalidNumeric { field: String, raw: String },
    /// Fewer historical values than the SPC minimum.
    InsufficientHistory {
        parameter: String,
        available: usize,
        required: usize,
    },
    /// Sum of concentrations is outside 100% ± tolerance.
    CompositionImbalance { total: f64, tolerance: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingParameter { component } => {
                write!(f, "No molar mass for component '{}'; contributed 0", component)
            }
            Diagnostic::InvalidNumeric { field, raw } => {
                write!(f, "Value '{}' for {} is not a number", raw, field)
            }
            Diagnostic::InsufficientHistory {
                parameter,
                available,
                required,
            } => write!(
                f,
                "{}: {} historical value(s), at least {} required for control limits",
                parameter, available, required
            ),
            Diagnostic::CompositionImbalance { total, tolerance } => write!(
                f,
                "Composition sums to {:.4}% (expected 100% ± {}%)",
                total, tolerance
            ),
        }
    }
}
