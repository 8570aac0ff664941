//! Schema assembly
//!
//! Maps the columns reported by a typed reader into the configuration model
//! and attaches the detected read options.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;

use super::error::InferenceError;
use super::reader::ColumnSchema;
use crate::models::{Attribute, Domain, Format, Metadata, Schema};

/// Read options detected for a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedLayout {
    /// Container format
    pub format: Format,
    /// Whether the first DSV row holds column names
    pub header: bool,
    /// Field delimiter; only set for DSV when one was detected or forced
    pub separator: Option<char>,
}

impl DetectedLayout {
    /// Metadata block recorded on the schema
    pub fn to_metadata(&self) -> Metadata {
        let separator = match self.format {
            Format::Dsv => self.separator,
            Format::Json | Format::ArrayJson => None,
        };
        Metadata::default()
            .with_format(self.format)
            .with_array(self.format.is_array())
            .with_header(self.header)
            .with_separator(separator)
    }
}

/// Build the single-schema domain describing a data file
///
/// Attributes follow `columns` in order. The schema pattern is derived from
/// the file's base name and the domain directory is the path with the base
/// name removed.
pub fn assemble_domain(
    domain_name: &str,
    schema_name: &str,
    data_path: &Path,
    layout: &DetectedLayout,
    columns: Vec<ColumnSchema>,
    escape_pattern: bool,
) -> Result<Domain, InferenceError> {
    let (directory, base_name) = split_path(data_path)?;
    let pattern = file_pattern(&base_name, escape_pattern)?;

    let mut seen = HashSet::new();
    let mut attributes = Vec::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.name.clone()) {
            return Err(InferenceError::DuplicateAttribute {
                schema: schema_name.to_string(),
                name: column.name,
            });
        }
        attributes.push(Attribute::new(column.name, column.data_type));
    }

    let schema =
        Schema::new(schema_name, pattern, attributes).with_metadata(layout.to_metadata());

    Ok(Domain::new(domain_name, directory).with_schema(schema))
}

/// Compile the file-name pattern for a base name
///
/// With `escape` the pattern matches the base name literally; without it the
/// base name is compiled as written.
pub fn file_pattern(base_name: &str, escape: bool) -> Result<Regex, InferenceError> {
    let source = if escape {
        regex::escape(base_name)
    } else {
        base_name.to_string()
    };
    Regex::new(&source).map_err(|e| InferenceError::PatternCompile {
        pattern: source,
        source: e,
    })
}

/// Split a data path into its containing directory (with trailing separator)
/// and its base name
pub fn split_path(data_path: &Path) -> Result<(String, String), InferenceError> {
    let base_name = data_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| InferenceError::InvalidPath {
            path: data_path.to_path_buf(),
        })?;

    let full = data_path.to_string_lossy();
    let directory = full
        .strip_suffix(base_name.as_str())
        .unwrap_or_default()
        .to_string();

    Ok((directory, base_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttributeType;

    fn dsv_layout() -> DetectedLayout {
        DetectedLayout {
            format: Format::Dsv,
            header: true,
            separator: Some(';'),
        }
    }

    #[test]
    fn test_split_path() {
        let (directory, base) = split_path(Path::new("/data/orders.csv")).unwrap();
        assert_eq!(directory, "/data/");
        assert_eq!(base, "orders.csv");

        let (directory, base) = split_path(Path::new("orders.csv")).unwrap();
        assert_eq!(directory, "");
        assert_eq!(base, "orders.csv");

        assert!(matches!(
            split_path(Path::new("/")),
            Err(InferenceError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_pattern_matches_literal_name() {
        let escaped = file_pattern("orders.csv", true).unwrap();
        assert!(escaped.is_match("orders.csv"));
        assert!(!escaped.is_match("ordersXcsv"));

        let raw = file_pattern("orders.csv", false).unwrap();
        assert!(raw.is_match("orders.csv"));
        assert!(raw.is_match("ordersXcsv"));
    }

    #[test]
    fn test_raw_pattern_compile_error() {
        assert!(file_pattern("report(1.csv", true).is_ok());
        assert!(matches!(
            file_pattern("report(1.csv", false),
            Err(InferenceError::PatternCompile { .. })
        ));
    }

    #[test]
    fn test_assemble_preserves_column_order() {
        let columns = vec![
            ColumnSchema::new("zeta", AttributeType::String),
            ColumnSchema::new("alpha", AttributeType::Long),
            ColumnSchema::new("mid", AttributeType::Timestamp),
        ];
        let domain = assemble_domain(
            "sales",
            "orders",
            Path::new("/data/orders.csv"),
            &dsv_layout(),
            columns,
            true,
        )
        .unwrap();

        assert_eq!(domain.name, "sales");
        assert_eq!(domain.directory, "/data/");
        let schema = &domain.schemas[0];
        assert_eq!(schema.name, "orders");
        assert_eq!(schema.attribute_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(schema.attributes[2].attribute_type, AttributeType::Timestamp);
        assert!(schema.pattern.is_match("orders.csv"));

        let metadata = schema.metadata.as_ref().unwrap();
        assert_eq!(metadata.format, Some(Format::Dsv));
        assert_eq!(metadata.array, Some(false));
        assert_eq!(metadata.with_header, Some(true));
        assert_eq!(metadata.separator, Some(';'));
    }

    #[test]
    fn test_json_layout_drops_separator() {
        let layout = DetectedLayout {
            format: Format::ArrayJson,
            header: false,
            separator: Some(','),
        };
        let metadata = layout.to_metadata();
        assert_eq!(metadata.array, Some(true));
        assert_eq!(metadata.separator, None);
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let columns = vec![
            ColumnSchema::new("id", AttributeType::Long),
            ColumnSchema::new("id", AttributeType::String),
        ];
        let result = assemble_domain(
            "sales",
            "orders",
            Path::new("/data/orders.csv"),
            &dsv_layout(),
            columns,
            true,
        );
        assert!(matches!(
            result,
            Err(InferenceError::DuplicateAttribute { ref name, .. }) if name == "id"
        ));
    }
}
