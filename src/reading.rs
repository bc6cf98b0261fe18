//! Numeric readings parsed at the input boundary.
//!
//! Bulletin fields arrive as form strings ("12,5", "", "n/a") or plain numbers.
//! They are converted once into a [`Reading`] so that calculation code never
//! sees raw strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A parsed numeric input with an explicit absent state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reading {
    /// Nothing was entered.
    #[default]
    Blank,
    /// Something was entered but it is not a finite decimal.
    Invalid(String),
    /// A finite decimal value.
    Value(f64),
}

impl Reading {
    /// Parse a form string. Accepts `.` or `,` as the decimal separator.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Reading::Blank;
        }

        let normalized = normalize_decimal(trimmed);
        match normalized.parse::<f64>() {
            Ok(v) if v.is_finite() => Reading::Value(v),
            _ => Reading::Invalid(trimmed.to_string()),
        }
    }

    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Reading::Value(value)
        } else {
            Reading::Invalid(value.to_string())
        }
    }

    /// The numeric value, if one was entered and parsed.
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// The value, treating blank or invalid input as zero.
    pub fn value_or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// True for a parsed value strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.value().is_some_and(|v| v > 0.0)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Reading::Blank)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Reading::Invalid(_))
    }

    /// The raw text of an unparsable entry.
    pub fn invalid_raw(&self) -> Option<&str> {
        match self {
            Reading::Invalid(raw) => Some(raw),
            _ => None,
        }
    }

    /// Blank, or a parsed zero. Such properties are eligible for derivation.
    pub fn is_blank_or_zero(&self) -> bool {
        match self {
            Reading::Blank => true,
            Reading::Value(v) => *v == 0.0,
            Reading::Invalid(_) => false,
        }
    }
}

/// Turn "1.234,5" and "12,5" into forms `f64::from_str` accepts.
fn normalize_decimal(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    match (compact.rfind(','), compact.rfind('.')) {
        // Both present: the right-most one is the decimal separator.
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replace(',', "."),
        _ => compact,
    }
}

impl FromStr for Reading {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Reading::parse(s))
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Reading::from_f64(value)
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map(Reading::from_f64).unwrap_or(Reading::Blank)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Blank => write!(f, ""),
            Reading::Invalid(raw) => write!(f, "{}", raw),
            Reading::Value(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Blank => serializer.serialize_none(),
            Reading::Invalid(raw) => serializer.serialize_str(raw),
            Reading::Value(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for Reading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let raw: Option<Raw> = Option::deserialize(deserializer)?;
        Ok(match raw {
            None => Reading::Blank,
            Some(Raw::Number(v)) => Reading::from_f64(v),
            Some(Raw::Text(s)) => Reading::parse(&s),
        })
    }
}
