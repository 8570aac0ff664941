//! Output formatting for CLI

use crate::inference::DetectedLayout;
use crate::models::Domain;

/// Format a detected layout for display
pub fn format_layout(layout: &DetectedLayout) -> String {
    let mut output = String::new();

    output.push_str(&format!("Format:    {}\n", layout.format));
    output.push_str(&format!("Array:     {}\n", layout.format.is_array()));
    output.push_str(&format!("Header:    {}\n", layout.header));
    let separator = match layout.separator {
        Some(c) => display_separator(c),
        None => "(none detected)".to_string(),
    };
    output.push_str(&format!("Separator: {}", separator));

    output
}

/// Format a short summary of an inferred domain
pub fn format_domain_summary(domain: &Domain) -> String {
    let mut output = format!("Domain '{}' ({})", domain.name, domain.directory);

    for schema in &domain.schemas {
        output.push_str(&format!(
            "\n  Schema '{}' [{}] - {} attribute(s)",
            schema.name,
            schema.pattern.as_str(),
            schema.attributes.len()
        ));
        let attributes: Vec<String> = schema
            .attributes
            .iter()
            .map(|a| format!("{}:{}", a.name, a.attribute_type))
            .collect();
        if !attributes.is_empty() {
            output.push_str(&format!("\n    {}", attributes.join(", ")));
        }
    }

    output
}

fn display_separator(c: char) -> String {
    match c {
        '\t' => "\\t".to_string(),
        ' ' => "' '".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, AttributeType, Format, Schema};
    use regex::Regex;

    #[test]
    fn test_format_layout() {
        let layout = DetectedLayout {
            format: Format::Dsv,
            header: true,
            separator: Some('\t'),
        };
        let output = format_layout(&layout);
        assert!(output.contains("Format:    DSV"));
        assert!(output.contains("Array:     false"));
        assert!(output.contains("Separator: \\t"));

        let layout = DetectedLayout {
            format: Format::Dsv,
            header: false,
            separator: None,
        };
        assert!(format_layout(&layout).contains("(none detected)"));
    }

    #[test]
    fn test_format_domain_summary() {
        let schema = Schema::new(
            "orders",
            Regex::new(r"orders\.csv").unwrap(),
            vec![Attribute::new("id", AttributeType::Long)],
        );
        let domain = Domain::new("sales", "/data/").with_schema(schema);

        let output = format_domain_summary(&domain);
        assert!(output.starts_with("Domain 'sales' (/data/)"));
        assert!(output.contains("1 attribute(s)"));
        assert!(output.contains("id:long"));
    }
}
