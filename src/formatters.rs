//! Output formatters for bulletin reports
//!
//! Turns a [`BulletinReport`] into the multi-section text shown by the CLI.

use colored::{ColoredString, Colorize};

use crate::deadline::RuleOutcome;
use crate::orchestrator::BulletinReport;
use crate::properties::DerivedProperties;
use crate::sample::{Component, PropertyOrigin, SampleProperty};
use crate::status::ValidationStatus;

/// Format a report as regular multi-section text output
pub fn format_report(report: &BulletinReport) -> String {
    let title = match &report.bulletin_id {
        Some(id) => format!("Bulletin {}", id),
        None => "Bulletin".to_string(),
    };
    let mut output = vec![
        title.bold().to_string(),
        "=".repeat(title.chars().count()),
        String::new(),
        format_summary(report),
        String::new(),
    ];

    output.push("Composition".bold().to_string());
    output.push("───────────".to_string());
    if report.components.is_empty() {
        output.push("  (no components)".dimmed().to_string());
    } else {
        output.push(
            format!(
                "  {:<18} {:>10}  {:<14} {:<14} {}",
                "Component", "mol %", "AGA-8", "CEP", "Control limits"
            )
            .dimmed()
            .to_string(),
        );
        for component in &report.components {
            output.push(format_component(component));
        }
    }
    if report.co2_ceiling.is_tightened() {
        let rules: Vec<String> = report
            .co2_ceiling
            .applied_rules
            .iter()
            .map(|r| r.to_string())
            .collect();
        output.push(
            format!(
                "  CO2 ceiling lowered to {}% ({})",
                format_number(report.co2_ceiling.value),
                rules.join("; ")
            )
            .yellow()
            .to_string(),
        );
    }
    output.push(String::new());

    output.push("Properties".bold().to_string());
    output.push("──────────".to_string());
    if report.properties.is_empty() {
        output.push("  (no properties)".dimmed().to_string());
    } else {
        for property in &report.properties {
            output.push(format_property(property));
        }
    }
    output.push(String::new());

    output.push("AGA-8 method".bold().to_string());
    output.push("────────────".to_string());
    match report.method.selected {
        Some(method) => output.push(format!(
            "  {} ({})",
            method.to_string().cyan(),
            report.method.reason
        )),
        None => output.push(
            format!("  Insufficient data: {}", report.method.reason)
                .yellow()
                .to_string(),
        ),
    }
    output.push(String::new());

    output.push("Dates".bold().to_string());
    output.push("─────".to_string());
    for outcome in report.dates.outcomes() {
        output.push(format_rule(outcome));
    }

    if !report.diagnostics.is_empty() {
        output.push(String::new());
        output.push("Diagnostics".bold().to_string());
        output.push("───────────".to_string());
        for diagnostic in &report.diagnostics {
            output.push(format!("  {} {}", "!".yellow(), diagnostic));
        }
    }

    output.join("\n")
}

/// Format derived properties only
pub fn format_derived(derived: &DerivedProperties) -> String {
    let mut output = vec!["Properties".bold().to_string(), "──────────".to_string()];
    if derived.properties.is_empty() {
        output.push("  (nothing to derive)".dimmed().to_string());
    }
    for property in &derived.properties {
        let value = property
            .value
            .value()
            .map(format_number)
            .unwrap_or_else(|| "-".to_string());
        output.push(format!(
            "  {:<28} {:>12}{}",
            property.id.label(),
            value,
            origin_marker(property.origin)
        ));
    }
    for diagnostic in &derived.diagnostics {
        output.push(format!("  {} {}", "!".yellow(), diagnostic));
    }
    output.join("\n")
}

fn format_summary(report: &BulletinReport) -> String {
    format!(
        "  {:<10} {}\n  {:<10} {}\n  {:<10} {}\n  {:<10} {}",
        "AGA-8:",
        paint(report.reference_aga8_status),
        "CEP:",
        paint(report.reference_cep_status),
        "Dates:",
        paint(report.date_status()),
        "Overall:",
        paint(report.overall_status()),
    )
}

fn format_component(component: &Component) -> String {
    let value = match component.molar_percent.value() {
        Some(v) => format_number(v),
        None => component
            .molar_percent
            .invalid_raw()
            .map(|raw| format!("'{}'", raw))
            .unwrap_or_else(|| "-".to_string()),
    };

    format!(
        "  {:<18} {:>10}  {:<14} {:<14} {}",
        component.name,
        value,
        paint(component.aga8_status),
        paint(component.cep_status),
        format_limits(component.cep_lower_limit, component.cep_upper_limit).dimmed()
    )
}

fn format_property(property: &SampleProperty) -> String {
    let value = match property.value.value() {
        Some(v) => format_number(v),
        None => "-".to_string(),
    };

    format!(
        "  {:<28} {:>12}{}  {:<14} {}",
        property.id.label(),
        value,
        origin_marker(property.origin),
        paint(property.cep_status),
        format_limits(property.cep_lower_limit, property.cep_upper_limit).dimmed()
    )
}

fn format_rule(outcome: &RuleOutcome) -> String {
    let symbol = match outcome.status {
        ValidationStatus::Ok => "✓".green(),
        ValidationStatus::OutOfRange => "✗".red(),
        ValidationStatus::Pending => "◌".yellow(),
        ValidationStatus::NotApplicable => "-".dimmed(),
    };

    let counted = match (outcome.elapsed_days, outcome.limit_days) {
        (Some(elapsed), Some(limit)) => format!(" ({}/{} days)", elapsed, limit),
        _ => String::new(),
    };

    match &outcome.message {
        Some(message) => format!("  {} {}{}: {}", symbol, outcome.rule, counted, message.red()),
        None => format!("  {} {}{}", symbol, outcome.rule, counted.dimmed()),
    }
}

fn paint(status: ValidationStatus) -> ColoredString {
    let label = format!("{:<12}", status.label());
    match status {
        ValidationStatus::Ok => label.green(),
        ValidationStatus::OutOfRange => label.red().bold(),
        ValidationStatus::Pending => label.yellow(),
        ValidationStatus::NotApplicable => label.dimmed(),
    }
}

fn origin_marker(origin: PropertyOrigin) -> &'static str {
    match origin {
        PropertyOrigin::Computed => " *",
        PropertyOrigin::Measured => "  ",
    }
}

fn format_limits(lower: Option<f64>, upper: Option<f64>) -> String {
    match (lower, upper) {
        (Some(lo), Some(hi)) => format!("[{} .. {}]", format_number(lo), format_number(hi)),
        _ => String::new(),
    }
}

/// Four decimals, trailing zeros trimmed
fn format_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
