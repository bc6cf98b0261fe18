//! Validation status shared by every rule set, and the reference aggregations.
//!
//! Aggregation precedence mirrors how a bulletin is read by the reviewer:
//! anything still waiting on data keeps the whole bulletin pending, otherwise
//! a single out-of-range item flags it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Ok,
    OutOfRange,
    /// Insufficient data to evaluate yet.
    #[default]
    Pending,
    NotApplicable,
}

impl ValidationStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, ValidationStatus::Ok)
    }

    pub fn is_out_of_range(self) -> bool {
        matches!(self, ValidationStatus::OutOfRange)
    }

    pub fn is_pending(self) -> bool {
        matches!(self, ValidationStatus::Pending)
    }

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            ValidationStatus::Ok => "OK",
            ValidationStatus::OutOfRange => "OUT OF RANGE",
            ValidationStatus::Pending => "PENDING",
            ValidationStatus::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One item taking part in a reference aggregation.
#[derive(Debug, Clone, Copy)]
pub struct StatusItem {
    pub status: ValidationStatus,
    /// Something was entered for the item (even if it failed to parse).
    pub has_input: bool,
    /// The item carries a parsed value greater than zero.
    pub is_positive: bool,
}

/// Aggregate component statuses into the reference AGA-8 status.
///
/// - Pending if any item with input is still pending
/// - OutOfRange if any item is out of range
/// - OK if at least one item is positive and every evaluated item is OK
///   (items without bounds report NotApplicable and are not evaluated)
/// - NotApplicable otherwise
pub fn aggregate_aga8(items: &[StatusItem]) -> ValidationStatus {
    if items.iter().any(|i| i.has_input && i.status.is_pending()) {
        return ValidationStatus::Pending;
    }

    if items.iter().any(|i| i.status.is_out_of_range()) {
        return ValidationStatus::OutOfRange;
    }

    let any_positive = items.iter().any(|i| i.is_positive);
    let all_evaluated_ok = items
        .iter()
        .filter(|i| i.has_input && i.status != ValidationStatus::NotApplicable)
        .all(|i| i.status.is_ok());

    if any_positive && all_evaluated_ok {
        return ValidationStatus::Ok;
    }

    ValidationStatus::NotApplicable
}

/// Aggregate SPC statuses into the reference CEP status.
///
/// Pending dominates OutOfRange, which dominates OK. NotApplicable only when
/// no item has a value at all.
pub fn aggregate_cep(items: &[StatusItem]) -> ValidationStatus {
    let with_input: Vec<&StatusItem> = items.iter().filter(|i| i.has_input).collect();
    if with_input.is_empty() {
        return ValidationStatus::NotApplicable;
    }

    if with_input.iter().any(|i| i.status.is_pending()) {
        return ValidationStatus::Pending;
    }

    if with_input.iter().any(|i| i.status.is_out_of_range()) {
        return ValidationStatus::OutOfRange;
    }

    if with_input.iter().any(|i| i.status.is_ok()) {
        return ValidationStatus::Ok;
    }

    ValidationStatus::NotApplicable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: ValidationStatus, has_input: bool, is_positive: bool) -> StatusItem {
        StatusItem {
            status,
            has_input,
            is_positive,
        }
    }

    #[test]
    fn test_aga8_pending_dominates() {
        let items = [
            item(ValidationStatus::OutOfRange, true, true),
            item(ValidationStatus::Pending, true, false),
        ];
        assert_eq!(aggregate_aga8(&items), ValidationStatus::Pending);
    }

    #[test]
    fn test_aga8_blank_pending_is_ignored() {
        let items = [
            item(ValidationStatus::Ok, true, true),
            item(ValidationStatus::Pending, false, false),
        ];
        assert_eq!(aggregate_aga8(&items), ValidationStatus::Ok);
    }

    #[test]
    fn test_aga8_out_of_range() {
        let items = [
            item(ValidationStatus::Ok, true, true),
            item(ValidationStatus::OutOfRange, true, true),
        ];
        assert_eq!(aggregate_aga8(&items), ValidationStatus::OutOfRange);
    }

    #[test]
    fn test_aga8_unbounded_items_do_not_block_ok() {
        let items = [
            item(ValidationStatus::Ok, true, true),
            item(ValidationStatus::NotApplicable, true, true),
        ];
        assert_eq!(aggregate_aga8(&items), ValidationStatus::Ok);
    }

    #[test]
    fn test_aga8_all_zero_is_not_applicable() {
        let items = [
            item(ValidationStatus::Ok, true, false),
            item(ValidationStatus::Ok, true, false),
        ];
        assert_eq!(aggregate_aga8(&items), ValidationStatus::NotApplicable);
        assert_eq!(aggregate_aga8(&[]), ValidationStatus::NotApplicable);
    }

    #[test]
    fn test_cep_precedence() {
        let items = [
            item(ValidationStatus::Ok, true, true),
            item(ValidationStatus::OutOfRange, true, true),
            item(ValidationStatus::Pending, true, true),
        ];
        assert_eq!(aggregate_cep(&items), ValidationStatus::Pending);
        assert_eq!(aggregate_cep(&items[..2]), ValidationStatus::OutOfRange);
        assert_eq!(aggregate_cep(&items[..1]), ValidationStatus::Ok);
    }

    #[test]
    fn test_cep_no_values() {
        let items = [item(ValidationStatus::NotApplicable, false, false)];
        assert_eq!(aggregate_cep(&items), ValidationStatus::NotApplicable);
    }
}
