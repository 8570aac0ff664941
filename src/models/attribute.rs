//! Attribute model

use serde::{Deserialize, Serialize};

use super::enums::AttributeType;

/// One column of a schema: a name and its inferred primitive type
///
/// # Example
///
/// ```rust
/// use data_modelling_infer::models::{Attribute, AttributeType};
///
/// let attribute = Attribute::new("id", AttributeType::Long);
/// assert_eq!(attribute.name, "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Column name as reported by the reader
    pub name: String,
    /// Inferred type
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }
}
