//! Schema (table definition) model
//!
//! A schema identifies the files it applies to through a compiled file-name
//! pattern, lists its attributes in column order and carries the read options
//! detected for the source file.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::enums::Format;

/// Read options detected for a schema
///
/// Every field is optional; an absent field means "not detected" or "not
/// applicable" and is left out of the emitted configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Container format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// True only when the file is a single JSON array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<bool>,
    /// Whether the first DSV row holds column names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_header: Option<bool>,
    /// Field delimiter, only meaningful for DSV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<char>,
}

impl Metadata {
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_array(mut self, array: bool) -> Self {
        self.array = Some(array);
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.with_header = Some(header);
        self
    }

    pub fn with_separator(mut self, separator: Option<char>) -> Self {
        self.separator = separator;
        self
    }
}

/// Definition of one record structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name
    pub name: String,
    /// File-name pattern selecting the files this schema applies to
    #[serde(with = "pattern_serde")]
    pub pattern: Regex,
    /// Attributes in source column order
    pub attributes: Vec<Attribute>,
    /// Detected read options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Schema {
    pub fn new(name: impl Into<String>, pattern: Regex, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            pattern,
            attributes,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Attribute names in column order
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }
}

// Regex has no PartialEq; two schemas are equal when their pattern sources are.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.pattern.as_str() == other.pattern.as_str()
            && self.attributes == other.attributes
            && self.metadata == other.metadata
    }
}

mod pattern_serde {
    use regex::Regex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(pattern: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(pattern.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Regex, D::Error> {
        let source = String::deserialize(deserializer)?;
        Regex::new(&source).map_err(serde::de::Error::custom)
    }
}
