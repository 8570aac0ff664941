//! Enumerations shared by the inference pipeline and the configuration model

use serde::{Deserialize, Serialize};

/// Container format of a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// One JSON object per line
    #[serde(rename = "JSON")]
    Json,
    /// A single JSON array, possibly spanning many lines
    #[serde(rename = "ARRAY_JSON")]
    ArrayJson,
    /// Delimiter-separated values
    #[serde(rename = "DSV")]
    Dsv,
}

impl Format {
    /// Whether the whole file is one JSON array
    pub fn is_array(&self) -> bool {
        matches!(self, Format::ArrayJson)
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::ArrayJson => write!(f, "ARRAY_JSON"),
            Format::Dsv => write!(f, "DSV"),
        }
    }
}

/// Primitive type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Long,
    Double,
    Boolean,
    Date,
    Timestamp,
    /// Nested record (JSON object)
    Struct,
    /// Repeated value (JSON array)
    Array,
}

impl AttributeType {
    /// Name used in the emitted configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Long => "long",
            AttributeType::Double => "double",
            AttributeType::Boolean => "boolean",
            AttributeType::Date => "date",
            AttributeType::Timestamp => "timestamp",
            AttributeType::Struct => "struct",
            AttributeType::Array => "array",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
