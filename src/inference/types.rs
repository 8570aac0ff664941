//! Type inference for cell and JSON values

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::AttributeType;

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?$").unwrap()
});

/// Type observed for a column while scanning rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    /// Only nulls or blanks seen so far
    Null,
    Boolean,
    Long,
    Double,
    Date,
    Timestamp,
    String,
    Struct,
    Array,
}

impl InferredType {
    /// Classify a delimited text cell
    ///
    /// Blank cells are null. Surrounding spaces are ignored for classification.
    pub fn of_text(cell: &str) -> InferredType {
        let value = cell.trim();
        if value.is_empty() {
            return InferredType::Null;
        }
        if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            return InferredType::Boolean;
        }
        if value.parse::<i64>().is_ok() {
            return InferredType::Long;
        }
        // "inf" and "NaN" parse as f64 but are words, not numbers
        if value.bytes().any(|b| b.is_ascii_digit()) && value.parse::<f64>().is_ok() {
            return InferredType::Double;
        }
        if DATE_REGEX.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
            return InferredType::Date;
        }
        if DATETIME_REGEX.is_match(value) && is_valid_timestamp(value) {
            return InferredType::Timestamp;
        }
        InferredType::String
    }

    /// Classify a JSON value
    pub fn of_json(value: &Value) -> InferredType {
        match value {
            Value::Null => InferredType::Null,
            Value::Bool(_) => InferredType::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    InferredType::Long
                } else {
                    InferredType::Double
                }
            }
            Value::String(_) => InferredType::String,
            Value::Array(_) => InferredType::Array,
            Value::Object(_) => InferredType::Struct,
        }
    }

    /// Merge this type with another observation of the same column
    pub fn merge_with(self, other: InferredType) -> InferredType {
        if self == other {
            return self;
        }

        match (self, other) {
            // Null + X = X
            (InferredType::Null, other) | (other, InferredType::Null) => other,

            // Long + Double = Double
            (InferredType::Long, InferredType::Double)
            | (InferredType::Double, InferredType::Long) => InferredType::Double,

            // Date + Timestamp = Timestamp
            (InferredType::Date, InferredType::Timestamp)
            | (InferredType::Timestamp, InferredType::Date) => InferredType::Timestamp,

            // Anything else widens to String
            _ => InferredType::String,
        }
    }

    /// Attribute type reported for the column; all-null columns are strings
    pub fn to_attribute_type(self) -> AttributeType {
        match self {
            InferredType::Null | InferredType::String => AttributeType::String,
            InferredType::Boolean => AttributeType::Boolean,
            InferredType::Long => AttributeType::Long,
            InferredType::Double => AttributeType::Double,
            InferredType::Date => AttributeType::Date,
            InferredType::Timestamp => AttributeType::Timestamp,
            InferredType::Struct => AttributeType::Struct,
            InferredType::Array => AttributeType::Array,
        }
    }
}

fn is_valid_timestamp(value: &str) -> bool {
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return true;
    }
    let normalized = value.replacen(' ', "T", 1);
    DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%z").is_ok()
        || NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || DateTime::parse_from_rfc3339(&normalized).is_ok()
}
