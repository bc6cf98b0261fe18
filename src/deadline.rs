//! Deadline state machine over the bulletin lifecycle dates.
//!
//! Every rule resolves to OK, OutOfRange, Pending (dates missing) or
//! NotApplicable. Only OutOfRange carries a message.
//!
//! The re-sampling rule is a live countdown: it reads "now" from the injected
//! [`Clock`], so its outcome changes from one call to the next.

mod business_days;

pub use business_days::{business_days_elapsed, is_business_day};

use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::clock::Clock;
use crate::config::DeadlineConfig;
use crate::sample::{FinalDecision, ProcessType, Sample, SampleDate};
use crate::status::ValidationStatus;

/// Every rule the validator evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRule {
    CollectionBeforeLabReceipt,
    LabReceiptBeforeAnalysis,
    AnalysisBeforeIssue,
    IssueBeforeRequesterReceipt,
    RequesterReceiptBeforeCriticalReview,
    CollectionToIssueDeadline,
    TotalProcessDeadline,
    ResamplingDeadline,
}

impl fmt::Display for DateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DateRule::CollectionBeforeLabReceipt => "Collection <= lab receipt",
            DateRule::LabReceiptBeforeAnalysis => "Lab receipt <= analysis",
            DateRule::AnalysisBeforeIssue => "Analysis <= bulletin issue",
            DateRule::IssueBeforeRequesterReceipt => "Bulletin issue <= requester receipt",
            DateRule::RequesterReceiptBeforeCriticalReview => {
                "Requester receipt <= critical review"
            }
            DateRule::CollectionToIssueDeadline => "Collection to issue deadline",
            DateRule::TotalProcessDeadline => "Total process deadline",
            DateRule::ResamplingDeadline => "Re-sampling deadline",
        };
        write!(f, "{}", text)
    }
}

/// Outcome of a single date rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: DateRule,
    pub status: ValidationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Calendar or business days counted, where the rule counts days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_days: Option<i64>,
}

impl RuleOutcome {
    fn new(rule: DateRule, status: ValidationStatus) -> Self {
        Self {
            rule,
            status,
            message: None,
            elapsed_days: None,
            limit_days: None,
        }
    }

    fn pending(rule: DateRule) -> Self {
        Self::new(rule, ValidationStatus::Pending)
    }

    fn not_applicable(rule: DateRule) -> Self {
        Self::new(rule, ValidationStatus::NotApplicable)
    }

    fn ok(rule: DateRule) -> Self {
        Self::new(rule, ValidationStatus::Ok)
    }

    fn violation(rule: DateRule, message: String) -> Self {
        Self {
            message: Some(message),
            ..Self::new(rule, ValidationStatus::OutOfRange)
        }
    }

    fn counted(mut self, elapsed: i64, limit: i64) -> Self {
        self.elapsed_days = Some(elapsed);
        self.limit_days = Some(limit);
        self
    }
}

/// One outcome per date rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValidationDetails {
    pub collection_to_lab_receipt: RuleOutcome,
    pub lab_receipt_to_analysis: RuleOutcome,
    pub analysis_to_issue: RuleOutcome,
    pub issue_to_requester_receipt: RuleOutcome,
    pub requester_receipt_to_critical_review: RuleOutcome,
    pub collection_to_issue_deadline: RuleOutcome,
    pub total_process_deadline: RuleOutcome,
    pub resampling_deadline: RuleOutcome,
}

impl DateValidationDetails {
    pub fn outcomes(&self) -> [&RuleOutcome; 8] {
        [
            &self.collection_to_lab_receipt,
            &self.lab_receipt_to_analysis,
            &self.analysis_to_issue,
            &self.issue_to_requester_receipt,
            &self.requester_receipt_to_critical_review,
            &self.collection_to_issue_deadline,
            &self.total_process_deadline,
            &self.resampling_deadline,
        ]
    }

    /// OutOfRange if any rule fails, else Pending if any is waiting on data,
    /// else OK if any rule passed, else NotApplicable.
    pub fn overall(&self) -> ValidationStatus {
        let outcomes = self.outcomes();
        if outcomes.iter().any(|o| o.status.is_out_of_range()) {
            ValidationStatus::OutOfRange
        } else if outcomes.iter().any(|o| o.status.is_pending()) {
            ValidationStatus::Pending
        } else if outcomes.iter().any(|o| o.status.is_ok()) {
            ValidationStatus::Ok
        } else {
            ValidationStatus::NotApplicable
        }
    }

    /// Messages of every failing rule.
    pub fn violations(&self) -> Vec<&str> {
        self.outcomes()
            .iter()
            .filter_map(|o| o.message.as_deref())
            .collect()
    }
}

/// Parse a UTC offset such as "-03:00", "+0530" or "Z".
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => anyhow::bail!("UTC offset '{}' must start with '+' or '-'", raw),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!("UTC offset '{}' must look like -03:00", raw);
    }

    let hours: i32 = digits[..2].parse().context("invalid offset hours")?;
    let minutes: i32 = digits[2..].parse().context("invalid offset minutes")?;
    if minutes >= 60 {
        anyhow::bail!("UTC offset '{}' has invalid minutes", raw);
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("UTC offset '{}' out of range", raw))
}

/// Evaluates lifecycle dates against ordering and deadline rules.
#[derive(Debug, Clone)]
pub struct DeadlineValidator {
    config: DeadlineConfig,
    offset: FixedOffset,
}

impl Default for DeadlineValidator {
    fn default() -> Self {
        let config = DeadlineConfig::default();
        let offset = parse_utc_offset(&config.utc_offset).unwrap_or_else(|_| Utc.fix());
        Self { config, offset }
    }
}

impl DeadlineValidator {
    pub fn new(config: DeadlineConfig) -> Result<Self> {
        let offset = parse_utc_offset(&config.utc_offset)
            .with_context(|| "Invalid deadlines.utc_offset in configuration".to_string())?;
        Ok(Self { config, offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn day(&self, date: Option<&SampleDate>) -> Option<NaiveDate> {
        date.map(|d| d.day_in(self.offset))
    }

    /// Evaluate every rule for the sample. `clock` is only read by the
    /// re-sampling rule.
    pub fn validate(&self, sample: &Sample, clock: &dyn Clock) -> DateValidationDetails {
        let dates = &sample.dates;
        let collection = self.day(dates.collection.as_ref());
        let lab_receipt = self.day(dates.lab_receipt.as_ref());
        let lab_analysis = self.day(dates.lab_analysis.as_ref());
        let issue = self.day(dates.bulletin_issue.as_ref());
        let requester_receipt = self.day(dates.requester_receipt.as_ref());
        let implementation = self.day(dates.implementation.as_ref());
        let critical_review = self.day(dates.critical_review.as_ref());

        let details = DateValidationDetails {
            collection_to_lab_receipt: ordering(
                DateRule::CollectionBeforeLabReceipt,
                ("collection", collection),
                ("lab receipt", lab_receipt),
            ),
            lab_receipt_to_analysis: ordering(
                DateRule::LabReceiptBeforeAnalysis,
                ("lab receipt", lab_receipt),
                ("lab analysis", lab_analysis),
            ),
            analysis_to_issue: ordering(
                DateRule::AnalysisBeforeIssue,
                ("lab analysis", lab_analysis),
                ("bulletin issue", issue),
            ),
            issue_to_requester_receipt: ordering(
                DateRule::IssueBeforeRequesterReceipt,
                ("bulletin issue", issue),
                ("requester receipt", requester_receipt),
            ),
            requester_receipt_to_critical_review: ordering(
                DateRule::RequesterReceiptBeforeCriticalReview,
                ("requester receipt", requester_receipt),
                ("critical review", critical_review),
            ),
            collection_to_issue_deadline: self.collection_to_issue(collection, issue),
            total_process_deadline: self.total_process(
                collection,
                implementation,
                sample.process_type,
            ),
            resampling_deadline: self.resampling(
                sample.decision,
                sample.resampling_recommended,
                critical_review,
                clock,
            ),
        };

        for outcome in details.outcomes() {
            debug!(rule = %outcome.rule, status = %outcome.status, "date rule evaluated");
        }

        details
    }

    fn collection_to_issue(
        &self,
        collection: Option<NaiveDate>,
        issue: Option<NaiveDate>,
    ) -> RuleOutcome {
        let rule = DateRule::CollectionToIssueDeadline;
        let limit = self.config.collection_to_issue_days;
        let (Some(collection), Some(issue)) = (collection, issue) else {
            return RuleOutcome::pending(rule);
        };

        let days = (issue - collection).num_days();
        if days < 0 {
            return RuleOutcome::violation(
                rule,
                format!(
                    "Bulletin issue date ({}) is before collection date ({})",
                    issue, collection
                ),
            )
            .counted(days, limit);
        }

        if days > limit {
            return RuleOutcome::violation(
                rule,
                format!(
                    "Bulletin issued {} days after collection, exceeding the {}-day limit",
                    days, limit
                ),
            )
            .counted(days, limit);
        }

        RuleOutcome::ok(rule).counted(days, limit)
    }

    fn total_process(
        &self,
        collection: Option<NaiveDate>,
        implementation: Option<NaiveDate>,
        process_type: ProcessType,
    ) -> RuleOutcome {
        let rule = DateRule::TotalProcessDeadline;
        let limit = match process_type {
            ProcessType::Normal => self.config.total_process_days_normal,
            ProcessType::WithoutValidation => self.config.total_process_days_without_validation,
        };
        let (Some(collection), Some(implementation)) = (collection, implementation) else {
            return RuleOutcome::pending(rule);
        };

        let days = (implementation - collection).num_days();
        if days < 0 {
            return RuleOutcome::violation(
                rule,
                format!(
                    "Implementation date ({}) is before collection date ({})",
                    implementation, collection
                ),
            )
            .counted(days, limit);
        }

        if days > limit {
            return RuleOutcome::violation(
                rule,
                format!(
                    "Implemented {} days after collection, exceeding the {}-day limit for {} process",
                    days, limit, process_type
                ),
            )
            .counted(days, limit);
        }

        RuleOutcome::ok(rule).counted(days, limit)
    }

    fn resampling(
        &self,
        decision: Option<FinalDecision>,
        recommended: bool,
        critical_review: Option<NaiveDate>,
        clock: &dyn Clock,
    ) -> RuleOutcome {
        let rule = DateRule::ResamplingDeadline;
        if decision != Some(FinalDecision::NotValidated) || !recommended {
            return RuleOutcome::not_applicable(rule);
        }

        let Some(review) = critical_review else {
            return RuleOutcome::pending(rule);
        };

        let limit = self.config.resampling_business_days;
        let today = clock.now().with_timezone(&self.offset).date_naive();
        let elapsed = business_days_elapsed(review, today);

        if elapsed > limit {
            return RuleOutcome::violation(
                rule,
                format!(
                    "Re-sampling overdue: {} business days since critical review on {}, limit is {}",
                    elapsed, review, limit
                ),
            )
            .counted(elapsed, limit);
        }

        RuleOutcome::ok(rule).counted(elapsed, limit)
    }
}

/// Non-strict ordering check between two lifecycle dates.
fn ordering(
    rule: DateRule,
    (earlier_name, earlier): (&str, Option<NaiveDate>),
    (later_name, later): (&str, Option<NaiveDate>),
) -> RuleOutcome {
    match (earlier, later) {
        (Some(e), Some(l)) if e <= l => RuleOutcome::ok(rule),
        (Some(e), Some(l)) => RuleOutcome::violation(
            rule,
            format!(
                "{} date ({}) is before {} date ({})",
                capitalize(later_name),
                l,
                earlier_name,
                e
            ),
        ),
        _ => RuleOutcome::pending(rule),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
